use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::Category,
    routes::form::FormData,
    uploads::Upload,
};

/// Multipart body of category create and update.
#[derive(Debug, Default, ToSchema)]
pub struct CategoryForm {
    pub name_uz: String,
    pub name_ru: String,
    pub slug: Option<String>,
    pub description_uz: Option<String>,
    pub description_ru: Option<String>,
    #[schema(value_type = Option<String>, format = Binary)]
    pub image: Option<Upload>,
    /// Clears the stored image on update unless a new one is sent.
    pub remove_image: bool,
}

impl CategoryForm {
    pub fn from_form(mut form: FormData) -> Self {
        Self {
            name_uz: form.text("name_uz").unwrap_or_default(),
            name_ru: form.text("name_ru").unwrap_or_default(),
            slug: form.text("slug"),
            description_uz: form.text("description_uz"),
            description_ru: form.text("description_ru"),
            remove_image: form.flag("remove_image"),
            image: form.file("image"),
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
pub struct CategoryList {
    pub items: Vec<Category>,
}
