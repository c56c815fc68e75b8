use crate::{
    dto::{
        settings::LanguageSettings,
        storefront::{
            BannerView, BrandDirectory, CatalogPage, CategoryDirectory, HomePage, LocalizedBrand,
            LocalizedCategory, ProductCard, ProductPage,
        },
    },
    entity::{brands, categories},
    error::{AppError, AppResult},
    i18n::{DEFAULT_LOCALE, Locale},
    models::WithCount,
    pagination::{CatalogFilters, PAGE_SIZE, PageLinks, Pagination},
    response::{ApiResponse, Meta},
    services::catalog_service::{
        self, ProductFilter, RELATED_PRODUCTS_LIMIT, count_products, get_banners,
        get_brands_with_count, get_categories_with_count, get_language_order, get_products,
        get_related_products,
    },
    state::AppState,
};

/// Products shown in the home page showcase.
pub const HOME_FEATURED_PRODUCTS: u64 = 8;

fn localize_categories(
    entries: &[WithCount<categories::Model>],
    locale: Locale,
) -> Vec<LocalizedCategory> {
    entries
        .iter()
        .map(|entry| LocalizedCategory::with_count(entry, locale))
        .collect()
}

fn localize_brands(entries: &[WithCount<brands::Model>], locale: Locale) -> Vec<LocalizedBrand> {
    entries
        .iter()
        .map(|entry| LocalizedBrand::with_count(entry, locale))
        .collect()
}

pub async fn languages(state: &AppState) -> AppResult<ApiResponse<LanguageSettings>> {
    let order = get_language_order(&state.orm).await?;
    Ok(ApiResponse::success(
        "Languages",
        LanguageSettings {
            default: DEFAULT_LOCALE,
            order,
        },
        None,
    ))
}

pub async fn home(state: &AppState, locale: Locale) -> AppResult<ApiResponse<HomePage>> {
    let db = &state.orm;
    let languages = get_language_order(db).await?;
    let banners = get_banners(db).await?;
    let categories = get_categories_with_count(db).await?;
    let brands = get_brands_with_count(db).await?;
    let featured = catalog_service::get_featured_products(db, Some(HOME_FEATURED_PRODUCTS)).await?;

    let page = HomePage {
        locale,
        languages,
        banners: banners.iter().map(BannerView::from).collect(),
        categories: localize_categories(&categories, locale),
        brands: localize_brands(&brands, locale),
        featured: featured
            .iter()
            .map(|product| ProductCard::localize(product, locale))
            .collect(),
    };
    Ok(ApiResponse::success("Home", page, None))
}

/// One page of the filtered catalog. The requested page is clamped into
/// range, so a stale link never produces an empty page past the end.
pub async fn catalog(
    state: &AppState,
    locale: Locale,
    filters: CatalogFilters,
    requested_page: Option<&str>,
) -> AppResult<ApiResponse<CatalogPage>> {
    let db = &state.orm;
    let filter = ProductFilter::from(&filters);

    let total = count_products(db, &filter).await?;
    let pagination = Pagination::resolve(total, PAGE_SIZE, requested_page);
    let products = get_products(db, &filter, pagination.offset, pagination.page_size).await?;
    let categories = get_categories_with_count(db).await?;
    let brands = get_brands_with_count(db).await?;

    tracing::debug!(
        %locale,
        total,
        page = pagination.current_page,
        search = filters.search(),
        category = filters.category_slug(),
        brand = filters.brand_slug(),
        "catalog page"
    );

    let links = PageLinks::build(&filters, locale, &pagination);
    let meta = Meta::from(&pagination);
    let page = CatalogPage {
        locale,
        items: products
            .iter()
            .map(|product| ProductCard::localize(product, locale))
            .collect(),
        pagination,
        links,
        categories: localize_categories(&categories, locale),
        brands: localize_brands(&brands, locale),
        filters,
    };
    Ok(ApiResponse::success("Catalog", page, Some(meta)))
}

pub async fn product_page(
    state: &AppState,
    locale: Locale,
    slug: &str,
) -> AppResult<ApiResponse<ProductPage>> {
    let db = &state.orm;
    let product = catalog_service::get_product_by_slug(db, slug)
        .await?
        .ok_or(AppError::NotFound)?;
    let related = get_related_products(
        db,
        product.product.category_id,
        product.product.id,
        RELATED_PRODUCTS_LIMIT,
    )
    .await?;

    let page = ProductPage {
        product: ProductCard::localize(&product, locale),
        specs: product.product.specs.clone(),
        related: related
            .iter()
            .map(|item| ProductCard::localize(item, locale))
            .collect(),
    };
    Ok(ApiResponse::success("Product", page, None))
}

pub async fn categories(
    state: &AppState,
    locale: Locale,
) -> AppResult<ApiResponse<CategoryDirectory>> {
    let entries = get_categories_with_count(&state.orm).await?;
    Ok(ApiResponse::success(
        "Categories",
        CategoryDirectory {
            items: localize_categories(&entries, locale),
        },
        None,
    ))
}

pub async fn brands(state: &AppState, locale: Locale) -> AppResult<ApiResponse<BrandDirectory>> {
    let entries = get_brands_with_count(&state.orm).await?;
    Ok(ApiResponse::success(
        "Brands",
        BrandDirectory {
            items: localize_brands(&entries, locale),
        },
        None,
    ))
}
