use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveValue::Set, EntityTrait};

use crate::{
    audit,
    dto::settings::{LanguageSettings, UpdateLanguageOrderRequest},
    entity::site_settings::{ActiveModel, Column, Entity as SiteSettings},
    error::{AppError, AppResult},
    i18n::{
        DEFAULT_LOCALE, LANGUAGE_ORDER_KEY, format_display_order, is_supported,
        resolve_display_order,
    },
    middleware::auth::{AuthUser, ensure_admin},
    response::{ApiResponse, Meta},
    services::catalog_service::get_language_order,
    state::AppState,
};

pub async fn get_settings(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<LanguageSettings>> {
    ensure_admin(user)?;
    let order = get_language_order(&state.orm).await?;
    Ok(ApiResponse::success(
        "Settings",
        LanguageSettings {
            default: DEFAULT_LOCALE,
            order,
        },
        None,
    ))
}

/// Stores the normalized form of the submitted order, e.g. ` ru , uz,ru`
/// becomes `ru,uz`.
pub async fn update_language_order(
    state: &AppState,
    user: &AuthUser,
    payload: UpdateLanguageOrderRequest,
) -> AppResult<ApiResponse<LanguageSettings>> {
    ensure_admin(user)?;
    if !payload
        .language_order
        .split(',')
        .any(|tag| is_supported(tag.trim()))
    {
        return Err(AppError::BadRequest("No supported language in order".into()));
    }

    let order = resolve_display_order(Some(&payload.language_order));
    let value = format_display_order(&order);

    let row = ActiveModel {
        key: Set(LANGUAGE_ORDER_KEY.to_string()),
        value: Set(value.clone()),
        updated_at: Set(Utc::now().into()),
    };
    SiteSettings::insert(row)
        .on_conflict(
            OnConflict::column(Column::Key)
                .update_columns([Column::Value, Column::UpdatedAt])
                .to_owned(),
        )
        .exec(&state.orm)
        .await?;
    tracing::info!(language_order = %value, "language order updated");

    audit::record(
        &state.pool,
        user,
        "settings_update",
        "site_settings",
        serde_json::json!({ "key": LANGUAGE_ORDER_KEY, "value": value }),
    )
    .await;

    Ok(ApiResponse::success(
        "Settings updated",
        LanguageSettings {
            default: DEFAULT_LOCALE,
            order,
        },
        Some(Meta::empty()),
    ))
}
