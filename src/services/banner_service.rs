use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{ActiveModelTrait, EntityTrait};

use crate::{
    audit,
    dto::banners::{BannerForm, BannerList, UpdateBannerRequest},
    entity::banners::{ActiveModel, Entity as Banners},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Banner,
    response::{ApiResponse, Meta},
    services::catalog_service::get_banners,
    state::AppState,
    uploads::UploadFolder,
};

fn clean_link(link: Option<String>) -> Option<String> {
    link.map(|l| l.trim().to_string()).filter(|l| !l.is_empty())
}

pub async fn list_banners(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<BannerList>> {
    ensure_admin(user)?;
    let items = get_banners(&state.orm)
        .await?
        .into_iter()
        .map(Banner::from)
        .collect();
    Ok(ApiResponse::success("Banners", BannerList { items }, None))
}

pub async fn create_banner(
    state: &AppState,
    user: &AuthUser,
    form: BannerForm,
) -> AppResult<ApiResponse<Banner>> {
    ensure_admin(user)?;
    let image = form.require_image()?;
    let image_url = state.storage.save(UploadFolder::Banners, image).await?;

    let active = ActiveModel {
        id: NotSet,
        image_url: Set(image_url),
        link_url: Set(clean_link(form.link_url)),
        created_at: NotSet,
    };
    let banner = active.insert(&state.orm).await?;
    tracing::info!(banner_id = banner.id, "banner created");

    audit::record(
        &state.pool,
        user,
        "banner_create",
        "banners",
        serde_json::json!({ "banner_id": banner.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Banner created",
        banner.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_banner(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    payload: UpdateBannerRequest,
) -> AppResult<ApiResponse<Banner>> {
    ensure_admin(user)?;
    let existing = Banners::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: ActiveModel = existing.into();
    active.link_url = Set(clean_link(payload.link_url));
    let banner = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        user,
        "banner_update",
        "banners",
        serde_json::json!({ "banner_id": banner.id }),
    )
    .await;

    Ok(ApiResponse::success("Updated", banner.into(), Some(Meta::empty())))
}

pub async fn delete_banner(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    let result = Banners::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.pool,
        user,
        "banner_delete",
        "banners",
        serde_json::json!({ "banner_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_links_are_dropped() {
        assert_eq!(clean_link(Some("  ".into())), None);
        assert_eq!(clean_link(None), None);
        assert_eq!(clean_link(Some(" /catalog ".into())).as_deref(), Some("/catalog"));
    }
}
