use sea_orm::{EntityTrait, PaginatorTrait, QuerySelect};

use crate::{
    dto::dashboard::DashboardStats,
    entity::{
        banners::Entity as Banners, brands::Entity as Brands, categories::Entity as Categories,
        products::Entity as Products,
    },
    error::AppResult,
    middleware::auth::{AuthUser, ensure_admin},
    models::ProductDetails,
    response::ApiResponse,
    services::catalog_service::{load_relations, newest_first},
    state::AppState,
};

const RECENT_PRODUCTS: u64 = 5;

pub async fn get_stats(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<DashboardStats>> {
    ensure_admin(user)?;
    let db = &state.orm;

    let products = Products::find().count(db).await?;
    let categories = Categories::find().count(db).await?;
    let brands = Brands::find().count(db).await?;
    let banners = Banners::find().count(db).await?;

    let recent = newest_first(Products::find())
        .limit(RECENT_PRODUCTS)
        .all(db)
        .await?;
    let recent_products = load_relations(db, recent)
        .await?
        .into_iter()
        .map(ProductDetails::from)
        .collect();

    Ok(ApiResponse::success(
        "Dashboard",
        DashboardStats {
            products,
            categories,
            brands,
            banners,
            recent_products,
        },
        None,
    ))
}
