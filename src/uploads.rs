use std::path::{Path, PathBuf};

use async_trait::async_trait;
use axum::body::Bytes;
use chrono::Utc;
use uuid::Uuid;

use crate::error::AppResult;

/// Target folder of an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadFolder {
    Categories,
    Brands,
    Products,
    Banners,
}

impl UploadFolder {
    pub fn as_str(self) -> &'static str {
        match self {
            UploadFolder::Categories => "categories",
            UploadFolder::Brands => "brands",
            UploadFolder::Products => "products",
            UploadFolder::Banners => "banners",
        }
    }
}

/// A file received from a multipart form.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Bytes,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Lowercased extension of the original name, `jpg` when missing or odd.
    pub fn extension(&self) -> String {
        Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .filter(|ext| {
                !ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric())
            })
            .unwrap_or_else(|| "jpg".to_string())
    }
}

/// Persists uploaded blobs and hands back the public URL to store.
#[async_trait]
pub trait FileStorage: Send + Sync {
    async fn save(&self, folder: UploadFolder, upload: &Upload) -> AppResult<String>;
}

/// `{unix_millis}-{12 hex}.{ext}`, unique without coordination.
pub fn generate_file_name(extension: &str) -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!(
        "{}-{}.{}",
        Utc::now().timestamp_millis(),
        &random[..12],
        extension
    )
}

/// Writes uploads below a local directory that is served statically.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
    url_prefix: String,
}

impl LocalStorage {
    pub fn new(root: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        let url_prefix: String = url_prefix.into();
        Self {
            root: root.into(),
            url_prefix: url_prefix.trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl FileStorage for LocalStorage {
    async fn save(&self, folder: UploadFolder, upload: &Upload) -> AppResult<String> {
        let dir = self.root.join(folder.as_str());
        tokio::fs::create_dir_all(&dir).await?;

        let file_name = generate_file_name(&upload.extension());
        tokio::fs::write(dir.join(&file_name), &upload.bytes).await?;

        tracing::debug!(
            folder = folder.as_str(),
            file = %file_name,
            size = upload.bytes.len(),
            "upload saved"
        );
        Ok(format!("{}/{}/{}", self.url_prefix, folder.as_str(), file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_falls_back_to_jpg() {
        assert_eq!(Upload::new("logo.PNG", "x").extension(), "png");
        assert_eq!(Upload::new("archive.tar.gz", "x").extension(), "gz");
        assert_eq!(Upload::new("noext", "x").extension(), "jpg");
        assert_eq!(Upload::new("weird.p n g", "x").extension(), "jpg");
    }

    #[test]
    fn generated_names_do_not_repeat() {
        let a = generate_file_name("jpg");
        let b = generate_file_name("jpg");
        assert_ne!(a, b);
        assert!(a.ends_with(".jpg"));
        let (millis, rest) = a.split_once('-').unwrap();
        assert!(millis.parse::<i64>().is_ok());
        assert_eq!(rest.len(), "0123456789ab.jpg".len());
    }

    #[tokio::test]
    async fn local_storage_writes_into_folder() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path(), "/uploads/");

        let url = storage
            .save(UploadFolder::Banners, &Upload::new("hero.webp", vec![1_u8, 2, 3]))
            .await
            .unwrap();

        assert!(url.starts_with("/uploads/banners/"));
        assert!(url.ends_with(".webp"));
        let file_name = url.rsplit('/').next().unwrap();
        let written = std::fs::read(dir.path().join("banners").join(file_name)).unwrap();
        assert_eq!(written, vec![1, 2, 3]);
    }
}
