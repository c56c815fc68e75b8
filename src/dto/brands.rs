use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::Brand,
    routes::form::FormData,
    uploads::Upload,
};

#[derive(Debug, Default, ToSchema)]
pub struct BrandForm {
    pub name_uz: String,
    pub name_ru: String,
    pub slug: Option<String>,
    #[schema(value_type = Option<String>, format = Binary)]
    pub logo: Option<Upload>,
    /// Clears the stored logo on update unless a new one is sent.
    pub remove_logo: bool,
}

impl BrandForm {
    pub fn from_form(mut form: FormData) -> Self {
        Self {
            name_uz: form.text("name_uz").unwrap_or_default(),
            name_ru: form.text("name_ru").unwrap_or_default(),
            slug: form.text("slug"),
            remove_logo: form.flag("remove_logo"),
            logo: form.file("logo"),
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.name_uz.trim().is_empty() || self.name_ru.trim().is_empty() {
            return Err(AppError::BadRequest("Names are required".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BrandList {
    pub items: Vec<Brand>,
}
