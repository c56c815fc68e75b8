use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, State},
    routing::{get, patch, put},
};

use crate::{
    dto::{
        banners::{BannerForm, BannerList, UpdateBannerRequest},
        brands::{BrandForm, BrandList},
        categories::{CategoryForm, CategoryList},
        dashboard::DashboardStats,
        products::{ProductForm, ProductList},
        settings::{LanguageSettings, UpdateLanguageOrderRequest},
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::{Banner, Brand, Category, ProductDetails},
    response::ApiResponse,
    routes::{form::FormData, params::AdminProductQuery},
    services::{
        banner_service, brand_service, category_service, dashboard_service, product_service,
        settings_service,
    },
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
        .route("/brands", get(list_brands).post(create_brand))
        .route(
            "/brands/{id}",
            get(get_brand).put(update_brand).delete(delete_brand),
        )
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/banners", get(list_banners).post(create_banner))
        .route("/banners/{id}", patch(update_banner).delete(delete_banner))
        .route("/settings", get(get_settings))
        .route("/settings/language-order", put(update_language_order))
}

#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    responses(
        (status = 200, description = "Catalog counts and recent products", body = ApiResponse<DashboardStats>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn dashboard(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<DashboardStats>>> {
    let resp = dashboard_service::get_stats(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/categories",
    responses(
        (status = 200, description = "All categories", body = ApiResponse<CategoryList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_categories(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<CategoryList>>> {
    let resp = category_service::list_categories(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/categories/{id}",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category", body = ApiResponse<Category>),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_category(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Category>>> {
    let resp = category_service::get_category(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/categories",
    request_body(content = CategoryForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Category created", body = ApiResponse<Category>),
        (status = 400, description = "Names are required"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_category(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<Category>>> {
    let form = CategoryForm::from_form(FormData::read(multipart).await?);
    let resp = category_service::create_category(&state, &user, form).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/categories/{id}",
    params(("id" = i32, Path, description = "Category ID")),
    request_body(content = CategoryForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<Category>),
        (status = 400, description = "Names are required"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_category(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<Category>>> {
    let form = CategoryForm::from_form(FormData::read(multipart).await?);
    let resp = category_service::update_category(&state, &user, id, form).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/categories/{id}",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category deleted"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Category still has products"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_category(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = category_service::delete_category(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/brands",
    responses(
        (status = 200, description = "All brands", body = ApiResponse<BrandList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_brands(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<BrandList>>> {
    let resp = brand_service::list_brands(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/brands/{id}",
    params(("id" = i32, Path, description = "Brand ID")),
    responses(
        (status = 200, description = "Brand", body = ApiResponse<Brand>),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_brand(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Brand>>> {
    let resp = brand_service::get_brand(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/brands",
    request_body(content = BrandForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Brand created", body = ApiResponse<Brand>),
        (status = 400, description = "Names are required"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_brand(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<Brand>>> {
    let form = BrandForm::from_form(FormData::read(multipart).await?);
    let resp = brand_service::create_brand(&state, &user, form).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/brands/{id}",
    params(("id" = i32, Path, description = "Brand ID")),
    request_body(content = BrandForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Brand updated", body = ApiResponse<Brand>),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_brand(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<Brand>>> {
    let form = BrandForm::from_form(FormData::read(multipart).await?);
    let resp = brand_service::update_brand(&state, &user, id, form).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/brands/{id}",
    params(("id" = i32, Path, description = "Brand ID")),
    responses(
        (status = 200, description = "Brand deleted"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Brand still has products"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_brand(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = brand_service::delete_brand(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/products",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("q" = Option<String>, Query, description = "Search in names and slug"),
        ("visibility" = Option<String>, Query, description = "active or hidden")
    ),
    responses(
        (status = 200, description = "Products of any visibility", body = ApiResponse<ProductList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_products(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<AdminProductQuery>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = product_service::list_products(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/products/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product with relations", body = ApiResponse<ProductDetails>),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<ProductDetails>>> {
    let resp = product_service::get_product(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/products",
    request_body(content = ProductForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Product created", body = ApiResponse<ProductDetails>),
        (status = 400, description = "Missing required fields"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_product(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<ProductDetails>>> {
    let form = ProductForm::from_form(FormData::read(multipart).await?)?;
    let resp = product_service::create_product(&state, &user, form).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/products/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    request_body(content = ProductForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<ProductDetails>),
        (status = 400, description = "Missing required fields"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<ProductDetails>>> {
    let form = ProductForm::from_form(FormData::read(multipart).await?)?;
    let resp = product_service::update_product(&state, &user, id, form).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/products/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product and its images deleted"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = product_service::delete_product(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/banners",
    responses(
        (status = 200, description = "All banners, newest first", body = ApiResponse<BannerList>),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_banners(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<BannerList>>> {
    let resp = banner_service::list_banners(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/banners",
    request_body(content = BannerForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Banner created", body = ApiResponse<Banner>),
        (status = 400, description = "Banner image required"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_banner(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<Banner>>> {
    let form = BannerForm::from_form(FormData::read(multipart).await?);
    let resp = banner_service::create_banner(&state, &user, form).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/banners/{id}",
    params(("id" = i32, Path, description = "Banner ID")),
    request_body = UpdateBannerRequest,
    responses(
        (status = 200, description = "Banner link updated", body = ApiResponse<Banner>),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_banner(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateBannerRequest>,
) -> AppResult<Json<ApiResponse<Banner>>> {
    let resp = banner_service::update_banner(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/banners/{id}",
    params(("id" = i32, Path, description = "Banner ID")),
    responses(
        (status = 200, description = "Banner deleted"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_banner(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = banner_service::delete_banner(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/settings",
    responses(
        (status = 200, description = "Language settings", body = ApiResponse<LanguageSettings>),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_settings(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<LanguageSettings>>> {
    let resp = settings_service::get_settings(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/settings/language-order",
    request_body = UpdateLanguageOrderRequest,
    responses(
        (status = 200, description = "Language order stored", body = ApiResponse<LanguageSettings>),
        (status = 400, description = "No supported language in order"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_language_order(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<UpdateLanguageOrderRequest>,
) -> AppResult<Json<ApiResponse<LanguageSettings>>> {
    let resp = settings_service::update_language_order(&state, &user, payload).await?;
    Ok(Json(resp))
}
