use serde::Serialize;
use utoipa::ToSchema;

use crate::models::ProductDetails;

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardStats {
    pub products: u64,
    pub categories: u64,
    pub brands: u64,
    pub banners: u64,
    pub recent_products: Vec<ProductDetails>,
}
