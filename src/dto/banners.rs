use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::Banner,
    routes::form::FormData,
    uploads::Upload,
};

#[derive(Debug, Default, ToSchema)]
pub struct BannerForm {
    pub link_url: Option<String>,
    #[schema(value_type = String, format = Binary)]
    pub image: Option<Upload>,
}

impl BannerForm {
    pub fn from_form(mut form: FormData) -> Self {
        Self {
            link_url: form.text("link_url"),
            image: form.file("image"),
        }
    }

    /// Returns the image; a banner cannot exist without one.
    pub fn require_image(&self) -> AppResult<&Upload> {
        self.image
            .as_ref()
            .filter(|image| !image.is_empty())
            .ok_or_else(|| AppError::BadRequest("Banner image required".into()))
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBannerRequest {
    pub link_url: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BannerList {
    pub items: Vec<Banner>,
}
