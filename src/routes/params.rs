use serde::Deserialize;
use utoipa::ToSchema;

use crate::{models::Visibility, pagination::CatalogFilters};

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl PageQuery {
    pub fn normalize(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;
        (page, per_page, offset)
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AdminProductQuery {
    #[serde(flatten)]
    pub pagination: PageQuery,
    pub q: Option<String>,
    pub visibility: Option<Visibility>,
}

/// Public catalog query. `page` stays raw text so that garbage values fall
/// back to the first page instead of failing extraction.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CatalogQuery {
    pub q: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub page: Option<String>,
}

impl CatalogQuery {
    pub fn into_parts(self) -> (CatalogFilters, Option<String>) {
        (CatalogFilters::new(self.q, self.category, self.brand), self.page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_pagination_is_clamped() {
        let p = PageQuery {
            page: Some(0),
            per_page: Some(500),
        };
        assert_eq!(p.normalize(), (1, 100, 0));
        assert_eq!(PageQuery::default().normalize(), (1, 20, 0));
        let p = PageQuery {
            page: Some(3),
            per_page: Some(10),
        };
        assert_eq!(p.normalize(), (3, 10, 20));
    }

    #[test]
    fn catalog_query_accepts_garbage_page() {
        let query: CatalogQuery =
            serde_urlencoded::from_str("q=beton&page=abc&category=").unwrap();
        let (filters, page) = query.into_parts();
        assert_eq!(filters.search(), Some("beton"));
        assert_eq!(filters.category_slug(), None);
        assert_eq!(page.as_deref(), Some("abc"));
    }
}
