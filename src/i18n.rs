use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// Setting key holding the comma separated language display order.
pub const LANGUAGE_ORDER_KEY: &str = "languageOrder";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Uz,
    Ru,
}

/// Supported locales in their default display order.
pub const LOCALES: [Locale; 2] = [Locale::Uz, Locale::Ru];

pub const DEFAULT_LOCALE: Locale = Locale::Uz;

impl Locale {
    pub fn as_str(self) -> &'static str {
        match self {
            Locale::Uz => "uz",
            Locale::Ru => "ru",
        }
    }

    /// Parses a path-segment language tag. Only the exact tags are accepted.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "uz" => Some(Locale::Uz),
            "ru" => Some(Locale::Ru),
            _ => None,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn is_supported(tag: &str) -> bool {
    Locale::parse(tag).is_some()
}

/// Resolves a `{lang}` path segment; unsupported tags are a not-found outcome.
pub fn require_locale(tag: &str) -> AppResult<Locale> {
    Locale::parse(tag).ok_or(AppError::NotFound)
}

/// Parses the stored display order. Unknown tags are dropped, repeated tags
/// keep their first position, and an empty result falls back to [`LOCALES`].
pub fn resolve_display_order(stored: Option<&str>) -> Vec<Locale> {
    let mut order: Vec<Locale> = Vec::with_capacity(LOCALES.len());
    for locale in stored
        .unwrap_or_default()
        .split(',')
        .filter_map(|tag| Locale::parse(tag.trim()))
    {
        if !order.contains(&locale) {
            order.push(locale);
        }
    }

    if order.is_empty() {
        LOCALES.to_vec()
    } else {
        order
    }
}

pub fn format_display_order(order: &[Locale]) -> String {
    order
        .iter()
        .map(|locale| locale.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

/// A value carried in both site languages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localized<T> {
    pub uz: T,
    pub ru: T,
}

impl<T> Localized<T> {
    pub fn new(uz: T, ru: T) -> Self {
        Self { uz, ru }
    }

    pub fn pick(&self, locale: Locale) -> &T {
        match locale {
            Locale::Uz => &self.uz,
            Locale::Ru => &self.ru,
        }
    }
}

impl Localized<String> {
    pub fn pick_str(&self, locale: Locale) -> &str {
        self.pick(locale).as_str()
    }
}

impl Localized<Option<String>> {
    /// Missing and blank variants both come back as `None`.
    pub fn pick_str(&self, locale: Locale) -> Option<&str> {
        self.pick(locale)
            .as_deref()
            .filter(|value| !value.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_uz_and_ru_are_supported() {
        assert!(is_supported("uz"));
        assert!(is_supported("ru"));
        for tag in ["", "en", "UZ", "Ru", "uz-UZ", " ru", "uzb"] {
            assert!(!is_supported(tag), "{tag:?} should not be supported");
        }
    }

    #[test]
    fn require_locale_rejects_unknown_tags_as_not_found() {
        assert_eq!(require_locale("ru").unwrap(), Locale::Ru);
        assert!(matches!(require_locale("en"), Err(AppError::NotFound)));
    }

    #[test]
    fn display_order_follows_setting() {
        assert_eq!(
            resolve_display_order(Some("ru,uz")),
            vec![Locale::Ru, Locale::Uz]
        );
        assert_eq!(
            resolve_display_order(Some(" uz , ru ")),
            vec![Locale::Uz, Locale::Ru]
        );
        assert_eq!(resolve_display_order(Some("ru")), vec![Locale::Ru]);
    }

    #[test]
    fn display_order_falls_back_to_default() {
        assert_eq!(resolve_display_order(None), LOCALES.to_vec());
        assert_eq!(resolve_display_order(Some("")), LOCALES.to_vec());
        assert_eq!(resolve_display_order(Some("en,de,,")), LOCALES.to_vec());
    }

    #[test]
    fn display_order_drops_unknown_and_repeated_tags() {
        assert_eq!(
            resolve_display_order(Some("ru,en,ru,uz,uz")),
            vec![Locale::Ru, Locale::Uz]
        );
        for stored in ["uz,uz", "ru,ru,ru", "uz,ru,uz,ru", "x,ru,ru"] {
            let order = resolve_display_order(Some(stored));
            let mut deduped = order.clone();
            deduped.dedup();
            assert_eq!(order, deduped);
            assert!(order.len() <= LOCALES.len());
        }
    }

    #[test]
    fn format_round_trips_through_resolve() {
        let order = vec![Locale::Ru, Locale::Uz];
        let stored = format_display_order(&order);
        assert_eq!(stored, "ru,uz");
        assert_eq!(resolve_display_order(Some(&stored)), order);
    }

    #[test]
    fn pick_returns_the_matching_variant() {
        let name = Localized::new(
            "Beton va Temir-beton".to_string(),
            "Бетон и железобетон".to_string(),
        );
        assert_eq!(name.pick_str(Locale::Uz), "Beton va Temir-beton");
        assert_eq!(name.pick_str(Locale::Ru), "Бетон и железобетон");
    }

    #[test]
    fn pick_on_missing_variant_is_absent() {
        let alt: Localized<Option<String>> = Localized::new(Some("Panel".into()), None);
        assert_eq!(alt.pick_str(Locale::Uz), Some("Panel"));
        assert_eq!(alt.pick_str(Locale::Ru), None);

        let blank: Localized<Option<String>> = Localized::new(Some("  ".into()), None);
        assert_eq!(blank.pick_str(Locale::Uz), None);
    }
}
