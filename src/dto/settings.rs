use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::i18n::Locale;

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateLanguageOrderRequest {
    /// Comma separated tags, e.g. `ru,uz`.
    pub language_order: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LanguageSettings {
    pub default: Locale,
    pub order: Vec<Locale>,
}
