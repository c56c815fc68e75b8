use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::{banners, brands, categories, product_images, products};
use crate::i18n::Localized;

pub use crate::entity::products::Visibility;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: i32,
    pub slug: String,
    pub name_uz: String,
    pub name_ru: String,
    pub description_uz: Option<String>,
    pub description_ru: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Brand {
    pub id: i32,
    pub slug: String,
    pub name_uz: String,
    pub name_ru: String,
    pub logo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductImage {
    pub id: i32,
    pub url: String,
    pub alt_uz: Option<String>,
    pub alt_ru: Option<String>,
    pub order: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i32,
    pub slug: String,
    pub name_uz: String,
    pub name_ru: String,
    pub description_uz: Option<String>,
    pub description_ru: Option<String>,
    pub specs: Option<String>,
    pub visibility: Visibility,
    pub category_id: i32,
    pub brand_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Admin view of a product with its relations resolved.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductDetails {
    #[serde(flatten)]
    pub product: Product,
    pub category: Category,
    pub brand: Option<Brand>,
    pub images: Vec<ProductImage>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Banner {
    pub id: i32,
    pub image_url: String,
    pub link_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A product row together with the rows it references. Images are sorted
/// by their `order` column.
#[derive(Debug, Clone)]
pub struct ProductWithRelations {
    pub product: products::Model,
    pub category: categories::Model,
    pub brand: Option<brands::Model>,
    pub images: Vec<product_images::Model>,
}

/// A category or brand row paired with its number of active products.
#[derive(Debug, Clone)]
pub struct WithCount<T> {
    pub item: T,
    pub active_product_count: u64,
}

pub fn category_name(model: &categories::Model) -> Localized<String> {
    Localized::new(model.name_uz.clone(), model.name_ru.clone())
}

pub fn category_description(model: &categories::Model) -> Localized<Option<String>> {
    Localized::new(model.description_uz.clone(), model.description_ru.clone())
}

pub fn brand_name(model: &brands::Model) -> Localized<String> {
    Localized::new(model.name_uz.clone(), model.name_ru.clone())
}

pub fn product_name(model: &products::Model) -> Localized<String> {
    Localized::new(model.name_uz.clone(), model.name_ru.clone())
}

pub fn product_description(model: &products::Model) -> Localized<Option<String>> {
    Localized::new(model.description_uz.clone(), model.description_ru.clone())
}

pub fn image_alt(model: &product_images::Model) -> Localized<Option<String>> {
    Localized::new(model.alt_uz.clone(), model.alt_ru.clone())
}

impl From<categories::Model> for Category {
    fn from(model: categories::Model) -> Self {
        Self {
            id: model.id,
            slug: model.slug,
            name_uz: model.name_uz,
            name_ru: model.name_ru,
            description_uz: model.description_uz,
            description_ru: model.description_ru,
            image_url: model.image_url,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<brands::Model> for Brand {
    fn from(model: brands::Model) -> Self {
        Self {
            id: model.id,
            slug: model.slug,
            name_uz: model.name_uz,
            name_ru: model.name_ru,
            logo_url: model.logo_url,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<product_images::Model> for ProductImage {
    fn from(model: product_images::Model) -> Self {
        Self {
            id: model.id,
            url: model.url,
            alt_uz: model.alt_uz,
            alt_ru: model.alt_ru,
            order: model.order,
        }
    }
}

impl From<products::Model> for Product {
    fn from(model: products::Model) -> Self {
        Self {
            id: model.id,
            slug: model.slug,
            name_uz: model.name_uz,
            name_ru: model.name_ru,
            description_uz: model.description_uz,
            description_ru: model.description_ru,
            specs: model.specs,
            visibility: model.visibility,
            category_id: model.category_id,
            brand_id: model.brand_id,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

impl From<ProductWithRelations> for ProductDetails {
    fn from(value: ProductWithRelations) -> Self {
        Self {
            product: value.product.into(),
            category: value.category.into(),
            brand: value.brand.map(Into::into),
            images: value.images.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<banners::Model> for Banner {
    fn from(model: banners::Model) -> Self {
        Self {
            id: model.id,
            image_url: model.image_url,
            link_url: model.link_url,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
