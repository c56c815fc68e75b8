use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};

use crate::{
    audit,
    dto::brands::{BrandForm, BrandList},
    entity::{
        brands::{ActiveModel, Column, Entity as Brands},
        products::{Column as ProductCol, Entity as Products},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Brand,
    response::{ApiResponse, Meta},
    services::slugs::{retry_slug, unique_slug},
    slug::base_slug,
    state::AppState,
    uploads::UploadFolder,
};

pub async fn list_brands(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<BrandList>> {
    ensure_admin(user)?;
    let items = Brands::find()
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Brand::from)
        .collect::<Vec<_>>();

    let total = items.len() as i64;
    Ok(ApiResponse::success(
        "Brands",
        BrandList { items },
        Some(Meta::new(1, total.max(1), total)),
    ))
}

pub async fn get_brand(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<Brand>> {
    ensure_admin(user)?;
    let brand = Brands::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Brand", brand.into(), None))
}

pub async fn create_brand(
    state: &AppState,
    user: &AuthUser,
    form: BrandForm,
) -> AppResult<ApiResponse<Brand>> {
    ensure_admin(user)?;
    form.validate()?;

    let base = base_slug(form.slug.as_deref(), &form.name_uz, &form.name_ru, "brand");
    let logo_url = match form.logo.as_ref() {
        Some(logo) => Some(state.storage.save(UploadFolder::Brands, logo).await?),
        None => None,
    };

    let active = ActiveModel {
        id: NotSet,
        slug: NotSet,
        name_uz: Set(form.name_uz.trim().to_string()),
        name_ru: Set(form.name_ru.trim().to_string()),
        logo_url: Set(logo_url),
        created_at: NotSet,
        updated_at: NotSet,
    };
    let mut attempt = 1;
    let brand = loop {
        let slug =
            unique_slug::<Brands, _>(&state.orm, Column::Slug, Column::Id, &base, None).await?;
        let mut candidate = active.clone();
        candidate.slug = Set(slug);
        match candidate.insert(&state.orm).await {
            Ok(brand) => break brand,
            Err(err) => retry_slug(err, &mut attempt)?,
        }
    };
    tracing::info!(brand_id = brand.id, slug = %brand.slug, "brand created");

    audit::record(
        &state.pool,
        user,
        "brand_create",
        "brands",
        serde_json::json!({ "brand_id": brand.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Brand created",
        brand.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_brand(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    form: BrandForm,
) -> AppResult<ApiResponse<Brand>> {
    ensure_admin(user)?;
    form.validate()?;

    let existing = Brands::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let base = base_slug(form.slug.as_deref(), &form.name_uz, &form.name_ru, "brand");

    let mut active: ActiveModel = existing.into();
    if let Some(logo) = form.logo.as_ref() {
        let url = state.storage.save(UploadFolder::Brands, logo).await?;
        active.logo_url = Set(Some(url));
    } else if form.remove_logo {
        active.logo_url = Set(None);
    }
    active.name_uz = Set(form.name_uz.trim().to_string());
    active.name_ru = Set(form.name_ru.trim().to_string());
    active.updated_at = Set(Utc::now().into());

    let mut attempt = 1;
    let brand = loop {
        let slug =
            unique_slug::<Brands, _>(&state.orm, Column::Slug, Column::Id, &base, Some(id)).await?;
        let mut candidate = active.clone();
        candidate.slug = Set(slug);
        match candidate.update(&state.orm).await {
            Ok(brand) => break brand,
            Err(err) => retry_slug(err, &mut attempt)?,
        }
    };

    audit::record(
        &state.pool,
        user,
        "brand_update",
        "brands",
        serde_json::json!({ "brand_id": brand.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        brand.into(),
        Some(Meta::empty()),
    ))
}

/// Refuses to delete a brand that still has products of any visibility.
pub async fn delete_brand(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;

    let txn = state.orm.begin().await?;
    let assigned = Products::find()
        .filter(ProductCol::BrandId.eq(id))
        .count(&txn)
        .await?;
    if assigned > 0 {
        tracing::debug!(brand_id = id, assigned, "brand delete refused");
        return Err(AppError::Conflict(
            "Cannot delete brand with assigned products".into(),
        ));
    }

    let result = Brands::delete_by_id(id).exec(&txn).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    txn.commit().await?;

    audit::record(
        &state.pool,
        user,
        "brand_delete",
        "brands",
        serde_json::json!({ "brand_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
