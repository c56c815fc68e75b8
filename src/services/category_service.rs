use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};

use crate::{
    audit,
    dto::categories::{CategoryForm, CategoryList},
    entity::{
        categories::{ActiveModel, Column, Entity as Categories},
        products::{Column as ProductCol, Entity as Products},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Category,
    response::{ApiResponse, Meta},
    services::slugs::{retry_slug, unique_slug},
    slug::base_slug,
    state::AppState,
    uploads::UploadFolder,
};

pub async fn list_categories(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<CategoryList>> {
    ensure_admin(user)?;
    let items = Categories::find()
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Category::from)
        .collect::<Vec<_>>();

    let total = items.len() as i64;
    Ok(ApiResponse::success(
        "Categories",
        CategoryList { items },
        Some(Meta::new(1, total.max(1), total)),
    ))
}

pub async fn get_category(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<Category>> {
    ensure_admin(user)?;
    let category = Categories::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Category", category.into(), None))
}

pub async fn create_category(
    state: &AppState,
    user: &AuthUser,
    form: CategoryForm,
) -> AppResult<ApiResponse<Category>> {
    ensure_admin(user)?;
    form.validate()?;

    let base = base_slug(form.slug.as_deref(), &form.name_uz, &form.name_ru, "category");
    let image_url = match form.image.as_ref() {
        Some(image) => Some(state.storage.save(UploadFolder::Categories, image).await?),
        None => None,
    };

    let active = ActiveModel {
        id: NotSet,
        slug: NotSet,
        name_uz: Set(form.name_uz.trim().to_string()),
        name_ru: Set(form.name_ru.trim().to_string()),
        description_uz: Set(form.description_uz),
        description_ru: Set(form.description_ru),
        image_url: Set(image_url),
        created_at: NotSet,
        updated_at: NotSet,
    };
    let mut attempt = 1;
    let category = loop {
        let slug =
            unique_slug::<Categories, _>(&state.orm, Column::Slug, Column::Id, &base, None).await?;
        let mut candidate = active.clone();
        candidate.slug = Set(slug);
        match candidate.insert(&state.orm).await {
            Ok(category) => break category,
            Err(err) => retry_slug(err, &mut attempt)?,
        }
    };
    tracing::info!(category_id = category.id, slug = %category.slug, "category created");

    audit::record(
        &state.pool,
        user,
        "category_create",
        "categories",
        serde_json::json!({ "category_id": category.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Category created",
        category.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_category(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    form: CategoryForm,
) -> AppResult<ApiResponse<Category>> {
    ensure_admin(user)?;
    form.validate()?;

    let existing = Categories::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let base = base_slug(form.slug.as_deref(), &form.name_uz, &form.name_ru, "category");

    let mut active: ActiveModel = existing.into();
    if let Some(image) = form.image.as_ref() {
        let url = state.storage.save(UploadFolder::Categories, image).await?;
        active.image_url = Set(Some(url));
    } else if form.remove_image {
        active.image_url = Set(None);
    }
    active.name_uz = Set(form.name_uz.trim().to_string());
    active.name_ru = Set(form.name_ru.trim().to_string());
    active.description_uz = Set(form.description_uz);
    active.description_ru = Set(form.description_ru);
    active.updated_at = Set(Utc::now().into());

    let mut attempt = 1;
    let category = loop {
        let slug =
            unique_slug::<Categories, _>(&state.orm, Column::Slug, Column::Id, &base, Some(id))
                .await?;
        let mut candidate = active.clone();
        candidate.slug = Set(slug);
        match candidate.update(&state.orm).await {
            Ok(category) => break category,
            Err(err) => retry_slug(err, &mut attempt)?,
        }
    };

    audit::record(
        &state.pool,
        user,
        "category_update",
        "categories",
        serde_json::json!({ "category_id": category.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        category.into(),
        Some(Meta::empty()),
    ))
}

/// Refuses to delete a category that still has products of any visibility.
pub async fn delete_category(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;

    let txn = state.orm.begin().await?;
    let assigned = Products::find()
        .filter(ProductCol::CategoryId.eq(id))
        .count(&txn)
        .await?;
    if assigned > 0 {
        tracing::debug!(category_id = id, assigned, "category delete refused");
        return Err(AppError::Conflict(
            "Cannot delete category with assigned products".into(),
        ));
    }

    let result = Categories::delete_by_id(id).exec(&txn).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    txn.commit().await?;

    audit::record(
        &state.pool,
        user,
        "category_delete",
        "categories",
        serde_json::json!({ "category_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
