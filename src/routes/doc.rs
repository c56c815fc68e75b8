use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse},
        banners::{BannerForm, BannerList, UpdateBannerRequest},
        brands::{BrandForm, BrandList},
        categories::{CategoryForm, CategoryList},
        dashboard::DashboardStats,
        products::{ProductForm, ProductList},
        settings::{LanguageSettings, UpdateLanguageOrderRequest},
        storefront::{
            BannerView, BrandDirectory, CatalogPage, CategoryDirectory, HomePage, LocalizedBrand,
            LocalizedCategory, LocalizedImage, ProductCard, ProductPage,
        },
    },
    i18n::Locale,
    models::{Banner, Brand, Category, Product, ProductDetails, ProductImage, Visibility},
    pagination::{CatalogFilters, PageLink, PageLinks, Pagination},
    response::{ApiResponse, Meta},
    routes::{admin, auth, health, params, storefront},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        storefront::languages,
        storefront::home,
        storefront::catalog,
        storefront::product,
        storefront::categories,
        storefront::brands,
        admin::dashboard,
        admin::list_categories,
        admin::get_category,
        admin::create_category,
        admin::update_category,
        admin::delete_category,
        admin::list_brands,
        admin::get_brand,
        admin::create_brand,
        admin::update_brand,
        admin::delete_brand,
        admin::list_products,
        admin::get_product,
        admin::create_product,
        admin::update_product,
        admin::delete_product,
        admin::list_banners,
        admin::create_banner,
        admin::update_banner,
        admin::delete_banner,
        admin::get_settings,
        admin::update_language_order
    ),
    components(
        schemas(
            Locale,
            Visibility,
            Category,
            Brand,
            Product,
            ProductImage,
            ProductDetails,
            Banner,
            LoginRequest,
            LoginResponse,
            CategoryForm,
            CategoryList,
            BrandForm,
            BrandList,
            ProductForm,
            ProductList,
            BannerForm,
            BannerList,
            UpdateBannerRequest,
            LanguageSettings,
            UpdateLanguageOrderRequest,
            DashboardStats,
            LocalizedCategory,
            LocalizedBrand,
            LocalizedImage,
            ProductCard,
            ProductPage,
            BannerView,
            HomePage,
            CatalogPage,
            CategoryDirectory,
            BrandDirectory,
            CatalogFilters,
            Pagination,
            PageLinks,
            PageLink,
            params::PageQuery,
            params::AdminProductQuery,
            params::CatalogQuery,
            Meta,
            ApiResponse<HomePage>,
            ApiResponse<CatalogPage>,
            ApiResponse<ProductPage>,
            ApiResponse<ProductDetails>,
            ApiResponse<ProductList>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Storefront", description = "Localized public catalog"),
        (name = "Admin", description = "Catalog management endpoints"),
        (name = "Auth", description = "Authentication endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
