use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};

use crate::{
    audit,
    dto::products::{ProductForm, ProductList},
    entity::{
        brands::Entity as Brands,
        categories::Entity as Categories,
        product_images::{
            ActiveModel as ImageActive, Column as ImageCol, Entity as ProductImages,
        },
        products::{ActiveModel, Column, Entity as Products, Model as ProductModel},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::ProductDetails,
    response::{ApiResponse, Meta},
    routes::params::AdminProductQuery,
    services::{
        catalog_service::{escape_like, load_relations, newest_first},
        slugs::{retry_slug, unique_slug},
    },
    slug::base_slug,
    state::AppState,
    uploads::UploadFolder,
};

/// Admin listing: every visibility, newest first.
pub async fn list_products(
    state: &AppState,
    user: &AuthUser,
    query: AdminProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = query.pagination.normalize();

    let mut condition = Condition::all();
    if let Some(search) = query.q.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", escape_like(search));
        condition = condition.add(
            Condition::any()
                .add(Expr::col(Column::NameUz).ilike(pattern.clone()))
                .add(Expr::col(Column::NameRu).ilike(pattern.clone()))
                .add(Expr::col(Column::Slug).ilike(pattern)),
        );
    }
    if let Some(visibility) = query.visibility {
        condition = condition.add(Column::Visibility.eq(visibility));
    }

    let finder = newest_first(Products::find().filter(condition));
    let total = finder.clone().count(&state.orm).await? as i64;

    let rows = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;
    let items = load_relations(&state.orm, rows)
        .await?
        .into_iter()
        .map(ProductDetails::from)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

pub async fn get_product(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<ProductDetails>> {
    ensure_admin(user)?;
    let details = find_details(&state.orm, id).await?;
    Ok(ApiResponse::success("Product", details, None))
}

pub async fn create_product(
    state: &AppState,
    user: &AuthUser,
    form: ProductForm,
) -> AppResult<ApiResponse<ProductDetails>> {
    ensure_admin(user)?;
    let category_id = form.validate()?;
    ensure_references(&state.orm, category_id, form.brand_id).await?;

    let base = base_slug(form.slug.as_deref(), &form.name_uz, &form.name_ru, "product");

    let mut urls = Vec::with_capacity(form.images.len());
    for image in &form.images {
        urls.push(state.storage.save(UploadFolder::Products, image).await?);
    }

    let active = ActiveModel {
        id: NotSet,
        slug: NotSet,
        name_uz: Set(form.name_uz.trim().to_string()),
        name_ru: Set(form.name_ru.trim().to_string()),
        description_uz: Set(form.description_uz),
        description_ru: Set(form.description_ru),
        specs: Set(form.specs),
        visibility: Set(form.visibility.unwrap_or_default()),
        category_id: Set(category_id),
        brand_id: Set(form.brand_id),
        created_at: NotSet,
        updated_at: NotSet,
    };
    let mut attempt = 1;
    let (product, txn) = loop {
        let slug =
            unique_slug::<Products, _>(&state.orm, Column::Slug, Column::Id, &base, None).await?;
        let mut candidate = active.clone();
        candidate.slug = Set(slug);
        let txn = state.orm.begin().await?;
        match candidate.insert(&txn).await {
            Ok(product) => break (product, txn),
            Err(err) => {
                txn.rollback().await?;
                retry_slug(err, &mut attempt)?;
            }
        }
    };
    append_images(&txn, product.id, 0, urls).await?;
    txn.commit().await?;

    tracing::info!(product_id = product.id, slug = %product.slug, "product created");
    audit::record(
        &state.pool,
        user,
        "product_create",
        "products",
        serde_json::json!({ "product_id": product.id }),
    )
    .await;

    let details = find_details(&state.orm, product.id).await?;
    Ok(ApiResponse::success(
        "Product created",
        details,
        Some(Meta::empty()),
    ))
}

/// Replaces the product fields, drops the images listed in `remove_image`,
/// closes the gaps in the remaining order and appends the new uploads.
pub async fn update_product(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    form: ProductForm,
) -> AppResult<ApiResponse<ProductDetails>> {
    ensure_admin(user)?;
    let category_id = form.validate()?;

    let existing = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    ensure_references(&state.orm, category_id, form.brand_id).await?;

    let base = base_slug(form.slug.as_deref(), &form.name_uz, &form.name_ru, "product");

    let mut urls = Vec::with_capacity(form.images.len());
    for image in &form.images {
        urls.push(state.storage.save(UploadFolder::Products, image).await?);
    }

    let mut active: ActiveModel = existing.into();
    active.name_uz = Set(form.name_uz.trim().to_string());
    active.name_ru = Set(form.name_ru.trim().to_string());
    active.description_uz = Set(form.description_uz);
    active.description_ru = Set(form.description_ru);
    active.specs = Set(form.specs);
    active.visibility = Set(form.visibility.unwrap_or_default());
    active.category_id = Set(category_id);
    active.brand_id = Set(form.brand_id);
    active.updated_at = Set(Utc::now().into());

    let mut attempt = 1;
    let (product, txn) = loop {
        let slug =
            unique_slug::<Products, _>(&state.orm, Column::Slug, Column::Id, &base, Some(id))
                .await?;
        let mut candidate = active.clone();
        candidate.slug = Set(slug);
        let txn = state.orm.begin().await?;
        match candidate.update(&txn).await {
            Ok(product) => break (product, txn),
            Err(err) => {
                txn.rollback().await?;
                retry_slug(err, &mut attempt)?;
            }
        }
    };

    if !form.remove_image.is_empty() {
        let removed = ProductImages::delete_many()
            .filter(ImageCol::ProductId.eq(id))
            .filter(ImageCol::Id.is_in(form.remove_image.clone()))
            .exec(&txn)
            .await?;
        tracing::debug!(product_id = id, removed = removed.rows_affected, "product images removed");
    }

    let remaining = ProductImages::find()
        .filter(ImageCol::ProductId.eq(id))
        .order_by_asc(ImageCol::Order)
        .order_by_asc(ImageCol::Id)
        .all(&txn)
        .await?;
    let next_order = remaining.len() as i32;
    // Ascending renumbering never targets a position still held by a later row.
    for (position, image) in remaining.into_iter().enumerate() {
        let position = position as i32;
        if image.order != position {
            let mut image: ImageActive = image.into();
            image.order = Set(position);
            image.update(&txn).await?;
        }
    }
    append_images(&txn, id, next_order, urls).await?;
    txn.commit().await?;

    audit::record(
        &state.pool,
        user,
        "product_update",
        "products",
        serde_json::json!({ "product_id": product.id, "removed_images": form.remove_image }),
    )
    .await;

    let details = find_details(&state.orm, product.id).await?;
    Ok(ApiResponse::success("Updated", details, Some(Meta::empty())))
}

pub async fn delete_product(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;

    let txn = state.orm.begin().await?;
    ProductImages::delete_many()
        .filter(ImageCol::ProductId.eq(id))
        .exec(&txn)
        .await?;
    let result = Products::delete_by_id(id).exec(&txn).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    txn.commit().await?;

    audit::record(
        &state.pool,
        user,
        "product_delete",
        "products",
        serde_json::json!({ "product_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

async fn find_details<C>(db: &C, id: i32) -> AppResult<ProductDetails>
where
    C: ConnectionTrait,
{
    let row: ProductModel = Products::find_by_id(id)
        .one(db)
        .await?
        .ok_or(AppError::NotFound)?;
    load_relations(db, vec![row])
        .await?
        .into_iter()
        .next()
        .map(ProductDetails::from)
        .ok_or(AppError::NotFound)
}

/// Unknown category or brand ids are a client error, caught before any write.
async fn ensure_references<C>(db: &C, category_id: i32, brand_id: Option<i32>) -> AppResult<()>
where
    C: ConnectionTrait,
{
    if Categories::find_by_id(category_id).one(db).await?.is_none() {
        return Err(AppError::BadRequest("Unknown category".into()));
    }
    if let Some(brand_id) = brand_id {
        if Brands::find_by_id(brand_id).one(db).await?.is_none() {
            return Err(AppError::BadRequest("Unknown brand".into()));
        }
    }
    Ok(())
}

async fn append_images<C>(db: &C, product_id: i32, start: i32, urls: Vec<String>) -> AppResult<()>
where
    C: ConnectionTrait,
{
    if urls.is_empty() {
        return Ok(());
    }
    let rows = urls.into_iter().enumerate().map(|(index, url)| ImageActive {
        id: NotSet,
        product_id: Set(product_id),
        url: Set(url),
        alt_uz: Set(None),
        alt_ru: Set(None),
        order: Set(start + index as i32),
    });
    ProductImages::insert_many(rows).exec(db).await?;
    Ok(())
}
