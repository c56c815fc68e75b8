pub mod auth;
pub mod banners;
pub mod brands;
pub mod categories;
pub mod dashboard;
pub mod products;
pub mod settings;
pub mod storefront;
