use std::collections::HashMap;

use axum::extract::Multipart;

use crate::{error::{AppError, AppResult}, uploads::Upload};

/// A multipart body split into text fields and non-empty files.
#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, Vec<String>>,
    files: HashMap<String, Vec<Upload>>,
}

impl FormData {
    pub async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = FormData::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::BadRequest(e.body_text()))?;
                    form.push_file(name, Upload::new(file_name, bytes));
                }
                None => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.body_text()))?;
                    form.push_text(name, text);
                }
            }
        }
        Ok(form)
    }

    pub fn push_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.entry(name.into()).or_default().push(value.into());
    }

    /// Browsers send an empty part for untouched file inputs; those are dropped.
    pub fn push_file(&mut self, name: impl Into<String>, upload: Upload) {
        if upload.is_empty() {
            return;
        }
        self.files.entry(name.into()).or_default().push(upload);
    }

    /// First value of a text field, trimmed; blank counts as absent.
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .and_then(|values| values.first())
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    /// Checkbox semantics: `on`, `true` and `1` are set, anything else is not.
    pub fn flag(&self, name: &str) -> bool {
        matches!(
            self.text(name).map(|v| v.to_ascii_lowercase()).as_deref(),
            Some("on" | "true" | "1")
        )
    }

    pub fn texts(&self, name: &str) -> Vec<String> {
        self.fields
            .get(name)
            .map(|values| {
                values
                    .iter()
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Raw first value, untrimmed, for free-form markup.
    pub fn raw(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .and_then(|values| values.first())
            .filter(|value| !value.trim().is_empty())
            .cloned()
    }

    pub fn file(&mut self, name: &str) -> Option<Upload> {
        self.files.get_mut(name).and_then(|files| {
            if files.is_empty() {
                None
            } else {
                Some(files.remove(0))
            }
        })
    }

    pub fn files(&mut self, name: &str) -> Vec<Upload> {
        self.files.remove(name).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_and_empty_files_are_absent() {
        let mut form = FormData::default();
        form.push_text("name_uz", "  Beton ");
        form.push_text("slug", "   ");
        form.push_file("image", Upload::new("empty.png", Vec::<u8>::new()));

        assert_eq!(form.text("name_uz").as_deref(), Some("Beton"));
        assert_eq!(form.text("slug"), None);
        assert_eq!(form.text("missing"), None);
        assert!(form.file("image").is_none());
    }

    #[test]
    fn checkbox_values_read_as_flags() {
        let mut form = FormData::default();
        form.push_text("remove_image", "on");
        form.push_text("remove_logo", "TRUE");
        form.push_text("featured", "off");

        assert!(form.flag("remove_image"));
        assert!(form.flag("remove_logo"));
        assert!(!form.flag("featured"));
        assert!(!form.flag("missing"));
    }

    #[test]
    fn repeated_fields_are_collected() {
        let mut form = FormData::default();
        form.push_text("remove_image", "3");
        form.push_text("remove_image", "");
        form.push_text("remove_image", "7");
        form.push_file("images", Upload::new("a.jpg", vec![1_u8]));
        form.push_file("images", Upload::new("b.jpg", vec![2_u8]));

        assert_eq!(form.texts("remove_image"), vec!["3", "7"]);
        assert_eq!(form.files("images").len(), 2);
        assert!(form.files("images").is_empty());
    }
}
