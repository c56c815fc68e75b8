use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::i18n::Locale;

/// Products shown per catalog page.
pub const PAGE_SIZE: u64 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct Pagination {
    pub current_page: u64,
    pub total_pages: u64,
    pub page_size: u64,
    pub total: u64,
    #[serde(skip)]
    pub offset: u64,
}

impl Pagination {
    /// Clamps the requested page into `1..=total_pages`. Missing,
    /// non-numeric, zero and negative requests land on page 1; numbers too
    /// large to represent land on the last page.
    pub fn resolve(total: u64, page_size: u64, requested: Option<&str>) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total.div_ceil(page_size).max(1);
        let current_page = requested
            .and_then(parse_page)
            .unwrap_or(1)
            .min(total_pages);

        Self {
            current_page,
            total_pages,
            page_size,
            total,
            offset: (current_page - 1) * page_size,
        }
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

fn parse_page(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    let digits = raw.strip_prefix('+').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let page = digits.parse::<u64>().unwrap_or(u64::MAX);
    (page >= 1).then_some(page)
}

/// Active catalog filters as they appear in the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CatalogFilters {
    pub q: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
}

#[derive(Serialize)]
struct LinkParams<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    q: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    brand: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<u64>,
}

#[derive(Default, Deserialize)]
struct ParsedParams {
    q: Option<String>,
    category: Option<String>,
    brand: Option<String>,
    page: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn cleaned(value: Option<String>) -> Option<String> {
    non_empty(&value).map(str::to_string)
}

impl CatalogFilters {
    /// Trims every filter; blank ones are dropped.
    pub fn new(q: Option<String>, category: Option<String>, brand: Option<String>) -> Self {
        Self {
            q: cleaned(q),
            category: cleaned(category),
            brand: cleaned(brand),
        }
    }

    pub fn search(&self) -> Option<&str> {
        non_empty(&self.q)
    }

    pub fn category_slug(&self) -> Option<&str> {
        non_empty(&self.category)
    }

    pub fn brand_slug(&self) -> Option<&str> {
        non_empty(&self.brand)
    }

    /// Serializes the filters and target page. Empty filters are left out
    /// and page 1 carries no `page` parameter.
    pub fn query_string(&self, page: u64) -> String {
        let params = LinkParams {
            q: self.search(),
            category: self.category_slug(),
            brand: self.brand_slug(),
            page: (page > 1).then_some(page),
        };
        serde_urlencoded::to_string(&params).unwrap_or_default()
    }

    pub fn href(&self, locale: Locale, page: u64) -> String {
        let query = self.query_string(page);
        if query.is_empty() {
            format!("/{locale}/catalog")
        } else {
            format!("/{locale}/catalog?{query}")
        }
    }

    /// Inverse of [`CatalogFilters::query_string`]; returns the filters and
    /// the raw page parameter.
    pub fn from_query_string(query: &str) -> (Self, Option<String>) {
        let query = query.strip_prefix('?').unwrap_or(query);
        let parsed: ParsedParams = serde_urlencoded::from_str(query).unwrap_or_default();
        (
            Self::new(parsed.q, parsed.category, parsed.brand),
            parsed.page,
        )
    }
}

/// Navigation links for one page of catalog results.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PageLinks {
    pub prev: Option<String>,
    pub next: Option<String>,
    pub pages: Vec<PageLink>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PageLink {
    pub page: u64,
    pub href: String,
    pub current: bool,
}

impl PageLinks {
    pub fn build(filters: &CatalogFilters, locale: Locale, pagination: &Pagination) -> Self {
        let current = pagination.current_page;
        Self {
            prev: pagination
                .has_prev()
                .then(|| filters.href(locale, current - 1)),
            next: pagination
                .has_next()
                .then(|| filters.href(locale, current + 1)),
            pages: (1..=pagination.total_pages)
                .map(|page| PageLink {
                    page,
                    href: filters.href(locale, page),
                    current: page == current,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_is_at_least_one() {
        assert_eq!(Pagination::resolve(0, 12, None).total_pages, 1);
        assert_eq!(Pagination::resolve(1, 12, None).total_pages, 1);
        assert_eq!(Pagination::resolve(12, 12, None).total_pages, 1);
        assert_eq!(Pagination::resolve(13, 12, None).total_pages, 2);
        assert_eq!(Pagination::resolve(25, 12, None).total_pages, 3);
    }

    #[test]
    fn requested_page_is_normalized() {
        for raw in [None, Some(""), Some("abc"), Some("0"), Some("-3"), Some("1.5")] {
            let p = Pagination::resolve(30, 12, raw);
            assert_eq!(p.current_page, 1, "{raw:?}");
            assert_eq!(p.offset, 0);
        }
        let p = Pagination::resolve(30, 12, Some("2"));
        assert_eq!((p.current_page, p.offset), (2, 12));
        let p = Pagination::resolve(30, 12, Some("99"));
        assert_eq!((p.current_page, p.offset), (3, 24));
    }

    #[test]
    fn oversized_page_number_lands_on_last_page() {
        let p = Pagination::resolve(30, 12, Some("99999999999999999999"));
        assert_eq!((p.current_page, p.total_pages, p.offset), (3, 3, 24));
        let p = Pagination::resolve(30, 12, Some("-99999999999999999999"));
        assert_eq!(p.current_page, 1);
    }

    #[test]
    fn page_beyond_single_page_result_is_first_page() {
        let p = Pagination::resolve(4, PAGE_SIZE, Some("5"));
        assert_eq!(p.current_page, 1);
        assert_eq!(p.total_pages, 1);
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn normalized_page_stays_in_range() {
        for total in [0_u64, 1, 11, 12, 13, 47, 120] {
            for size in [1_u64, 5, 12] {
                for raw in ["-1", "0", "1", "2", "7", "1000", "99999999999999999999"] {
                    let p = Pagination::resolve(total, size, Some(raw));
                    assert_eq!(p.total_pages, total.div_ceil(size).max(1));
                    assert!(p.current_page >= 1 && p.current_page <= p.total_pages);
                    assert_eq!(p.offset, (p.current_page - 1) * size);
                }
            }
        }
    }

    #[test]
    fn query_string_omits_first_page_and_empty_filters() {
        let filters = CatalogFilters::new(
            Some("beton".into()),
            Some(String::new()),
            Some("ndm-structural".into()),
        );
        assert_eq!(filters.query_string(1), "q=beton&brand=ndm-structural");
        assert_eq!(filters.query_string(3), "q=beton&brand=ndm-structural&page=3");
        assert_eq!(CatalogFilters::default().query_string(1), "");
        assert_eq!(CatalogFilters::default().query_string(2), "page=2");
    }

    #[test]
    fn blank_filters_stay_out_of_links() {
        let filters = CatalogFilters::new(Some("   ".into()), Some(" ".into()), Some("\t".into()));
        assert_eq!(filters, CatalogFilters::default());
        assert_eq!(filters.search(), None);
        assert_eq!(filters.href(Locale::Uz, 1), "/uz/catalog");
        assert_eq!(filters.href(Locale::Ru, 2), "/ru/catalog?page=2");

        let padded = CatalogFilters::new(Some("  beton ".into()), None, None);
        assert_eq!(padded.href(Locale::Uz, 1), "/uz/catalog?q=beton");
    }

    #[test]
    fn href_has_no_question_mark_without_params() {
        let filters = CatalogFilters::default();
        assert_eq!(filters.href(Locale::Uz, 1), "/uz/catalog");
        assert_eq!(filters.href(Locale::Ru, 2), "/ru/catalog?page=2");
    }

    #[test]
    fn query_string_round_trips() {
        let filters = CatalogFilters::new(
            Some("Бетон & co".into()),
            Some("beton-va-temirbeton".into()),
            None,
        );
        for page in [1, 2, 10] {
            let built = filters.query_string(page);
            let (parsed, raw_page) = CatalogFilters::from_query_string(&built);
            let page_again = Pagination::resolve(1000, 12, raw_page.as_deref()).current_page;
            assert_eq!(page_again, page);
            assert_eq!(parsed.query_string(page_again), built);
        }
    }

    #[test]
    fn page_links_mark_current_and_neighbours() {
        let filters = CatalogFilters::new(None, Some("metpro".into()), None);
        let pagination = Pagination::resolve(30, 12, Some("2"));
        let links = PageLinks::build(&filters, Locale::Uz, &pagination);

        assert_eq!(links.prev.as_deref(), Some("/uz/catalog?category=metpro"));
        assert_eq!(links.next.as_deref(), Some("/uz/catalog?category=metpro&page=3"));
        assert_eq!(links.pages.len(), 3);
        assert!(links.pages[1].current);
        assert!(!links.pages[0].current);
    }
}
