use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{ProductDetails, Visibility},
    routes::form::FormData,
    uploads::Upload,
};

/// Multipart body of product create and update. `remove_image` is only
/// honoured on update.
#[derive(Debug, Default, ToSchema)]
pub struct ProductForm {
    pub name_uz: String,
    pub name_ru: String,
    pub slug: Option<String>,
    pub description_uz: Option<String>,
    pub description_ru: Option<String>,
    /// Free-form specification markup.
    pub specs: Option<String>,
    pub visibility: Option<Visibility>,
    pub category_id: Option<i32>,
    pub brand_id: Option<i32>,
    pub remove_image: Vec<i32>,
    #[schema(value_type = Vec<String>)]
    pub images: Vec<Upload>,
}

fn parse_id(field: &str, value: Option<String>) -> AppResult<Option<i32>> {
    value
        .map(|raw| {
            raw.parse::<i32>()
                .map_err(|_| AppError::BadRequest(format!("Invalid {field}")))
        })
        .transpose()
}

fn parse_visibility(value: Option<String>) -> AppResult<Option<Visibility>> {
    match value.as_deref() {
        None => Ok(None),
        Some("active") => Ok(Some(Visibility::Active)),
        Some("hidden") => Ok(Some(Visibility::Hidden)),
        Some(_) => Err(AppError::BadRequest("Invalid visibility".into())),
    }
}

impl ProductForm {
    pub fn from_form(mut form: FormData) -> AppResult<Self> {
        let remove_image = form
            .texts("remove_image")
            .into_iter()
            .map(|raw| {
                raw.parse::<i32>()
                    .map_err(|_| AppError::BadRequest("Invalid remove_image".into()))
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Self {
            name_uz: form.text("name_uz").unwrap_or_default(),
            name_ru: form.text("name_ru").unwrap_or_default(),
            slug: form.text("slug"),
            description_uz: form.text("description_uz"),
            description_ru: form.text("description_ru"),
            specs: form.raw("specs"),
            visibility: parse_visibility(form.text("visibility"))?,
            category_id: parse_id("category_id", form.text("category_id"))?,
            brand_id: parse_id("brand_id", form.text("brand_id"))?,
            remove_image,
            images: form.files("images"),
        })
    }

    pub fn validate(&self) -> AppResult<i32> {
        if self.name_uz.trim().is_empty() || self.name_ru.trim().is_empty() {
            return Err(AppError::BadRequest("Missing required fields".into()));
        }
        self.category_id
            .ok_or_else(|| AppError::BadRequest("Missing required fields".into()))
    }
}

#[derive(Serialize, ToSchema)]
pub struct ProductList {
    pub items: Vec<ProductDetails>,
}
