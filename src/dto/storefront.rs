use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    entity::{banners, brands, categories, product_images},
    i18n::Locale,
    models::{
        ProductWithRelations, WithCount, brand_name, category_description, category_name,
        image_alt, product_description, product_name,
    },
    pagination::{CatalogFilters, PageLinks, Pagination},
};

#[derive(Debug, Serialize, ToSchema)]
pub struct LocalizedCategory {
    pub id: i32,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_count: Option<u64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LocalizedBrand {
    pub id: i32,
    pub slug: String,
    pub name: String,
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_count: Option<u64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LocalizedImage {
    pub url: String,
    pub alt: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductCard {
    pub id: i32,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub category: LocalizedCategory,
    pub brand: Option<LocalizedBrand>,
    pub images: Vec<LocalizedImage>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductPage {
    #[serde(flatten)]
    pub product: ProductCard,
    pub specs: Option<String>,
    pub related: Vec<ProductCard>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BannerView {
    pub id: i32,
    pub image_url: String,
    pub link_url: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HomePage {
    pub locale: Locale,
    pub languages: Vec<Locale>,
    pub banners: Vec<BannerView>,
    pub categories: Vec<LocalizedCategory>,
    pub brands: Vec<LocalizedBrand>,
    pub featured: Vec<ProductCard>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogPage {
    pub locale: Locale,
    pub filters: CatalogFilters,
    pub items: Vec<ProductCard>,
    pub pagination: Pagination,
    pub links: PageLinks,
    pub categories: Vec<LocalizedCategory>,
    pub brands: Vec<LocalizedBrand>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryDirectory {
    pub items: Vec<LocalizedCategory>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BrandDirectory {
    pub items: Vec<LocalizedBrand>,
}

impl LocalizedCategory {
    pub fn localize(model: &categories::Model, locale: Locale) -> Self {
        Self {
            id: model.id,
            slug: model.slug.clone(),
            name: category_name(model).pick(locale).clone(),
            description: category_description(model)
                .pick_str(locale)
                .map(str::to_string),
            image_url: model.image_url.clone(),
            product_count: None,
        }
    }

    pub fn with_count(entry: &WithCount<categories::Model>, locale: Locale) -> Self {
        Self {
            product_count: Some(entry.active_product_count),
            ..Self::localize(&entry.item, locale)
        }
    }
}

impl LocalizedBrand {
    pub fn localize(model: &brands::Model, locale: Locale) -> Self {
        Self {
            id: model.id,
            slug: model.slug.clone(),
            name: brand_name(model).pick(locale).clone(),
            logo_url: model.logo_url.clone(),
            product_count: None,
        }
    }

    pub fn with_count(entry: &WithCount<brands::Model>, locale: Locale) -> Self {
        Self {
            product_count: Some(entry.active_product_count),
            ..Self::localize(&entry.item, locale)
        }
    }
}

impl LocalizedImage {
    pub fn localize(model: &product_images::Model, locale: Locale) -> Self {
        Self {
            url: model.url.clone(),
            alt: image_alt(model).pick_str(locale).map(str::to_string),
        }
    }
}

impl ProductCard {
    pub fn localize(value: &ProductWithRelations, locale: Locale) -> Self {
        Self {
            id: value.product.id,
            slug: value.product.slug.clone(),
            name: product_name(&value.product).pick(locale).clone(),
            description: product_description(&value.product)
                .pick_str(locale)
                .map(str::to_string),
            category: LocalizedCategory::localize(&value.category, locale),
            brand: value
                .brand
                .as_ref()
                .map(|brand| LocalizedBrand::localize(brand, locale)),
            images: value
                .images
                .iter()
                .map(|image| LocalizedImage::localize(image, locale))
                .collect(),
        }
    }
}

impl From<&banners::Model> for BannerView {
    fn from(model: &banners::Model) -> Self {
        Self {
            id: model.id,
            image_url: model.image_url.clone(),
            link_url: model.link_url.clone(),
        }
    }
}
