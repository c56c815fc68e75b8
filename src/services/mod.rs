pub mod auth_service;
pub mod banner_service;
pub mod brand_service;
pub mod catalog_service;
pub mod category_service;
pub mod dashboard_service;
pub mod product_service;
pub mod settings_service;
pub mod slugs;
pub mod storefront_service;
