use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use crate::{
    dto::{
        settings::LanguageSettings,
        storefront::{BrandDirectory, CatalogPage, CategoryDirectory, HomePage, ProductPage},
    },
    error::AppResult,
    i18n::require_locale,
    response::ApiResponse,
    routes::params::CatalogQuery,
    services::storefront_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/languages", get(languages))
        .route("/{lang}/home", get(home))
        .route("/{lang}/catalog", get(catalog))
        .route("/{lang}/products/{slug}", get(product))
        .route("/{lang}/categories", get(categories))
        .route("/{lang}/brands", get(brands))
}

#[utoipa::path(
    get,
    path = "/api/languages",
    responses(
        (status = 200, description = "Default language and display order", body = ApiResponse<LanguageSettings>),
    ),
    tag = "Storefront"
)]
pub async fn languages(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<LanguageSettings>>> {
    let resp = storefront_service::languages(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/{lang}/home",
    params(("lang" = String, Path, description = "Language tag: uz or ru")),
    responses(
        (status = 200, description = "Banners, directories and featured products", body = ApiResponse<HomePage>),
        (status = 404, description = "Unsupported language"),
    ),
    tag = "Storefront"
)]
pub async fn home(
    State(state): State<AppState>,
    Path(lang): Path<String>,
) -> AppResult<Json<ApiResponse<HomePage>>> {
    let locale = require_locale(&lang)?;
    let resp = storefront_service::home(&state, locale).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/{lang}/catalog",
    params(
        ("lang" = String, Path, description = "Language tag: uz or ru"),
        ("q" = Option<String>, Query, description = "Case-insensitive search in product names"),
        ("category" = Option<String>, Query, description = "Category slug"),
        ("brand" = Option<String>, Query, description = "Brand slug"),
        ("page" = Option<String>, Query, description = "Page number, clamped into range")
    ),
    responses(
        (status = 200, description = "One page of active products", body = ApiResponse<CatalogPage>),
        (status = 404, description = "Unsupported language"),
    ),
    tag = "Storefront"
)]
pub async fn catalog(
    State(state): State<AppState>,
    Path(lang): Path<String>,
    Query(query): Query<CatalogQuery>,
) -> AppResult<Json<ApiResponse<CatalogPage>>> {
    let locale = require_locale(&lang)?;
    let (filters, page) = query.into_parts();
    let resp = storefront_service::catalog(&state, locale, filters, page.as_deref()).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/{lang}/products/{slug}",
    params(
        ("lang" = String, Path, description = "Language tag: uz or ru"),
        ("slug" = String, Path, description = "Product slug")
    ),
    responses(
        (status = 200, description = "Product with related products", body = ApiResponse<ProductPage>),
        (status = 404, description = "Unknown slug, hidden product or unsupported language"),
    ),
    tag = "Storefront"
)]
pub async fn product(
    State(state): State<AppState>,
    Path((lang, slug)): Path<(String, String)>,
) -> AppResult<Json<ApiResponse<ProductPage>>> {
    let locale = require_locale(&lang)?;
    let resp = storefront_service::product_page(&state, locale, &slug).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/{lang}/categories",
    params(("lang" = String, Path, description = "Language tag: uz or ru")),
    responses(
        (status = 200, description = "Categories with active product counts", body = ApiResponse<CategoryDirectory>),
        (status = 404, description = "Unsupported language"),
    ),
    tag = "Storefront"
)]
pub async fn categories(
    State(state): State<AppState>,
    Path(lang): Path<String>,
) -> AppResult<Json<ApiResponse<CategoryDirectory>>> {
    let locale = require_locale(&lang)?;
    let resp = storefront_service::categories(&state, locale).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/{lang}/brands",
    params(("lang" = String, Path, description = "Language tag: uz or ru")),
    responses(
        (status = 200, description = "Brands with active product counts", body = ApiResponse<BrandDirectory>),
        (status = 404, description = "Unsupported language"),
    ),
    tag = "Storefront"
)]
pub async fn brands(
    State(state): State<AppState>,
    Path(lang): Path<String>,
) -> AppResult<Json<ApiResponse<BrandDirectory>>> {
    let locale = require_locale(&lang)?;
    let resp = storefront_service::brands(&state, locale).await?;
    Ok(Json(resp))
}
