use std::collections::HashMap;

use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Expr, Query};
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, FromQueryResult, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select,
};

use crate::{
    entity::{
        banners::{self, Entity as Banners},
        brands::{self, Entity as Brands},
        categories::{self, Entity as Categories},
        product_images::{self, Entity as ProductImages},
        products::{self, Column, Entity as Products, Visibility},
        site_settings::Entity as SiteSettings,
    },
    error::AppResult,
    i18n::{LANGUAGE_ORDER_KEY, Locale, resolve_display_order},
    models::{ProductWithRelations, WithCount},
    pagination::CatalogFilters,
};

pub const RELATED_PRODUCTS_LIMIT: u64 = 4;
pub const FEATURED_PRODUCTS_LIMIT: u64 = 6;

/// Filters applied to the public product listing. Empty strings count as
/// absent.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub search: Option<String>,
    pub category_slug: Option<String>,
    pub brand_slug: Option<String>,
}

impl ProductFilter {
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
    pub fn category(mut self, slug: impl Into<String>) -> Self {
        self.category_slug = Some(slug.into());
        self
    }
    pub fn brand(mut self, slug: impl Into<String>) -> Self {
        self.brand_slug = Some(slug.into());
        self
    }
}

impl From<&CatalogFilters> for ProductFilter {
    fn from(filters: &CatalogFilters) -> Self {
        Self {
            search: filters.search().map(str::to_string),
            category_slug: filters.category_slug().map(str::to_string),
            brand_slug: filters.brand_slug().map(str::to_string),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Escapes LIKE metacharacters so the term matches literally.
pub(crate) fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// The single predicate shared by [`count_products`] and [`get_products`].
pub fn product_condition(filter: &ProductFilter) -> Condition {
    let mut condition = Condition::all().add(Column::Visibility.eq(Visibility::Active));

    if let Some(search) = non_empty(&filter.search) {
        let pattern = format!("%{}%", escape_like(search));
        condition = condition.add(
            Condition::any()
                .add(Expr::col(Column::NameUz).ilike(pattern.clone()))
                .add(Expr::col(Column::NameRu).ilike(pattern)),
        );
    }

    if let Some(slug) = non_empty(&filter.category_slug) {
        condition = condition.add(
            Column::CategoryId.in_subquery(
                Query::select()
                    .column(categories::Column::Id)
                    .from(Categories)
                    .and_where(categories::Column::Slug.eq(slug))
                    .to_owned(),
            ),
        );
    }

    if let Some(slug) = non_empty(&filter.brand_slug) {
        condition = condition.add(
            Column::BrandId.in_subquery(
                Query::select()
                    .column(brands::Column::Id)
                    .from(Brands)
                    .and_where(brands::Column::Slug.eq(slug))
                    .to_owned(),
            ),
        );
    }

    condition
}

/// Newest first; the primary key breaks ties between equal timestamps.
pub fn newest_first(select: Select<Products>) -> Select<Products> {
    select
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id)
}

pub async fn count_products<C>(db: &C, filter: &ProductFilter) -> AppResult<u64>
where
    C: ConnectionTrait,
{
    let total = Products::find()
        .filter(product_condition(filter))
        .count(db)
        .await?;
    Ok(total)
}

pub async fn get_products<C>(
    db: &C,
    filter: &ProductFilter,
    skip: u64,
    take: u64,
) -> AppResult<Vec<ProductWithRelations>>
where
    C: ConnectionTrait,
{
    let rows = newest_first(Products::find().filter(product_condition(filter)))
        .offset(skip)
        .limit(take)
        .all(db)
        .await?;
    load_relations(db, rows).await
}

/// Public lookup: hidden products are reported as absent.
pub async fn get_product_by_slug<C>(db: &C, slug: &str) -> AppResult<Option<ProductWithRelations>>
where
    C: ConnectionTrait,
{
    let row = Products::find()
        .filter(Column::Slug.eq(slug))
        .filter(Column::Visibility.eq(Visibility::Active))
        .one(db)
        .await?;

    let Some(row) = row else {
        return Ok(None);
    };
    Ok(load_relations(db, vec![row]).await?.into_iter().next())
}

pub async fn get_related_products<C>(
    db: &C,
    category_id: i32,
    exclude_product_id: i32,
    take: u64,
) -> AppResult<Vec<ProductWithRelations>>
where
    C: ConnectionTrait,
{
    let rows = newest_first(
        Products::find()
            .filter(Column::Visibility.eq(Visibility::Active))
            .filter(Column::CategoryId.eq(category_id))
            .filter(Column::Id.ne(exclude_product_id)),
    )
    .limit(take)
    .all(db)
    .await?;
    load_relations(db, rows).await
}

/// Newest active products; `None` takes [`FEATURED_PRODUCTS_LIMIT`].
pub async fn get_featured_products<C>(
    db: &C,
    limit: Option<u64>,
) -> AppResult<Vec<ProductWithRelations>>
where
    C: ConnectionTrait,
{
    let limit = limit.unwrap_or(FEATURED_PRODUCTS_LIMIT);
    get_products(db, &ProductFilter::default(), 0, limit).await
}

/// Attaches category, brand and ordered images to each product row,
/// preserving the input order.
pub async fn load_relations<C>(
    db: &C,
    rows: Vec<products::Model>,
) -> AppResult<Vec<ProductWithRelations>>
where
    C: ConnectionTrait,
{
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let product_ids: Vec<i32> = rows.iter().map(|p| p.id).collect();
    let mut category_ids: Vec<i32> = rows.iter().map(|p| p.category_id).collect();
    category_ids.sort_unstable();
    category_ids.dedup();
    let mut brand_ids: Vec<i32> = rows.iter().filter_map(|p| p.brand_id).collect();
    brand_ids.sort_unstable();
    brand_ids.dedup();

    let categories: HashMap<i32, categories::Model> = Categories::find()
        .filter(categories::Column::Id.is_in(category_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    let brands: HashMap<i32, brands::Model> = if brand_ids.is_empty() {
        HashMap::new()
    } else {
        Brands::find()
            .filter(brands::Column::Id.is_in(brand_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|b| (b.id, b))
            .collect()
    };

    let mut images: HashMap<i32, Vec<product_images::Model>> = HashMap::new();
    for image in ProductImages::find()
        .filter(product_images::Column::ProductId.is_in(product_ids))
        .order_by_asc(product_images::Column::ProductId)
        .order_by_asc(product_images::Column::Order)
        .order_by_asc(product_images::Column::Id)
        .all(db)
        .await?
    {
        images.entry(image.product_id).or_default().push(image);
    }

    let mut out = Vec::with_capacity(rows.len());
    for product in rows {
        let Some(category) = categories.get(&product.category_id).cloned() else {
            tracing::warn!(
                product_id = product.id,
                category_id = product.category_id,
                "product category missing"
            );
            continue;
        };
        let brand = product.brand_id.and_then(|id| brands.get(&id).cloned());
        let images = images.remove(&product.id).unwrap_or_default();
        out.push(ProductWithRelations {
            product,
            category,
            brand,
            images,
        });
    }
    Ok(out)
}

#[derive(Debug, FromQueryResult)]
struct GroupCount {
    key: i32,
    total: i64,
}

async fn active_counts_by<C>(db: &C, column: Column) -> AppResult<HashMap<i32, u64>>
where
    C: ConnectionTrait,
{
    let rows = Products::find()
        .select_only()
        .column_as(column, "key")
        .column_as(Expr::col(Column::Id).count(), "total")
        .filter(Column::Visibility.eq(Visibility::Active))
        .filter(column.is_not_null())
        .group_by(column)
        .into_model::<GroupCount>()
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|row| (row.key, row.total.max(0) as u64))
        .collect())
}

/// All categories in creation order with their active product counts.
pub async fn get_categories_with_count<C>(db: &C) -> AppResult<Vec<WithCount<categories::Model>>>
where
    C: ConnectionTrait,
{
    let counts = active_counts_by(db, Column::CategoryId).await?;
    let categories = Categories::find()
        .order_by_asc(categories::Column::CreatedAt)
        .order_by_asc(categories::Column::Id)
        .all(db)
        .await?;

    Ok(categories
        .into_iter()
        .map(|item| WithCount {
            active_product_count: counts.get(&item.id).copied().unwrap_or(0),
            item,
        })
        .collect())
}

/// All brands in creation order with their active product counts.
pub async fn get_brands_with_count<C>(db: &C) -> AppResult<Vec<WithCount<brands::Model>>>
where
    C: ConnectionTrait,
{
    let counts = active_counts_by(db, Column::BrandId).await?;
    let brands = Brands::find()
        .order_by_asc(brands::Column::CreatedAt)
        .order_by_asc(brands::Column::Id)
        .all(db)
        .await?;

    Ok(brands
        .into_iter()
        .map(|item| WithCount {
            active_product_count: counts.get(&item.id).copied().unwrap_or(0),
            item,
        })
        .collect())
}

pub async fn get_banners<C>(db: &C) -> AppResult<Vec<banners::Model>>
where
    C: ConnectionTrait,
{
    let banners = Banners::find()
        .order_by_desc(banners::Column::CreatedAt)
        .order_by_desc(banners::Column::Id)
        .all(db)
        .await?;
    Ok(banners)
}

/// Reads the display order setting; read fresh on every call.
pub async fn get_language_order<C>(db: &C) -> AppResult<Vec<Locale>>
where
    C: ConnectionTrait,
{
    let setting = SiteSettings::find_by_id(LANGUAGE_ORDER_KEY.to_string())
        .one(db)
        .await?;
    Ok(resolve_display_order(
        setting.as_ref().map(|s| s.value.as_str()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};

    fn sql(filter: &ProductFilter) -> String {
        newest_first(Products::find().filter(product_condition(filter)))
            .build(DbBackend::Postgres)
            .to_string()
    }

    #[test]
    fn no_filters_only_restricts_visibility() {
        let sql = sql(&ProductFilter::default());
        assert!(sql.contains(r#""products"."visibility" = 'active'"#), "{sql}");
        assert!(!sql.contains("ILIKE"));
        assert!(!sql.contains("IN (SELECT"));
        assert!(
            sql.ends_with(r#"ORDER BY "products"."created_at" DESC, "products"."id" DESC"#),
            "{sql}"
        );
    }

    #[test]
    fn empty_strings_are_ignored() {
        let filter = ProductFilter::default().search("  ").category("").brand("");
        assert_eq!(sql(&filter), sql(&ProductFilter::default()));
    }

    #[test]
    fn search_matches_either_name() {
        let sql = sql(&ProductFilter::default().search("beton"));
        assert!(sql.contains(r#""name_uz" ILIKE '%beton%'"#), "{sql}");
        assert!(sql.contains(r#""name_ru" ILIKE '%beton%'"#), "{sql}");
        assert!(sql.contains(") OR ("), "{sql}");
    }

    #[test]
    fn search_term_is_escaped() {
        assert_eq!(escape_like("50%_a\\b"), "50\\%\\_a\\\\b");
    }

    #[test]
    fn slug_filters_use_subqueries() {
        let sql = sql(
            &ProductFilter::default()
                .category("beton-va-temirbeton")
                .brand("metpro"),
        );
        let category = r#""category_id" IN (SELECT "id" FROM "categories" WHERE "categories"."slug" = 'beton-va-temirbeton')"#;
        let brand = r#""brand_id" IN (SELECT "id" FROM "brands" WHERE "brands"."slug" = 'metpro')"#;
        assert!(sql.contains(category), "{sql}");
        assert!(sql.contains(brand), "{sql}");
    }
}
