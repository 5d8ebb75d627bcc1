//! Blob storage for uploaded images.
//!
//! Profile pictures and posters are uploaded first and the returned URL is
//! stored on the record afterwards. If the record write fails the blob stays
//! behind; nothing cleans it up.

use std::path::PathBuf;

use async_trait::async_trait;
use uuid::Uuid;

use crate::config::UploadConfig;

/// Content types accepted for upload, with the file extension used on disk.
pub const ALLOWED_IMAGE_TYPES: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/webp", "webp"),
    ("image/gif", "gif"),
];

/// File extension for an accepted image content type.
pub fn extension_for(content_type: &str) -> Option<&'static str> {
    ALLOWED_IMAGE_TYPES
        .iter()
        .find(|(ct, _)| ct.eq_ignore_ascii_case(content_type))
        .map(|(_, ext)| *ext)
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where uploaded bytes go. Returns the public URL of the stored blob.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn put(&self, bytes: &[u8], extension: &str) -> Result<String, StorageError>;
}

/// Stores blobs as files under a local directory with random names.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    dir: PathBuf,
    public_base_url: String,
}

impl LocalBlobStore {
    pub fn new(dir: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &UploadConfig) -> Self {
        Self::new(config.dir.clone(), config.public_base_url.clone())
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(&self, bytes: &[u8], extension: &str) -> Result<String, StorageError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let file_name = format!("{}.{extension}", Uuid::new_v4());
        tokio::fs::write(self.dir.join(&file_name), bytes).await?;

        tracing::debug!(file = %file_name, size = bytes.len(), "Stored upload");
        Ok(format!("{}/{file_name}", self.public_base_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_lookup() {
        assert_eq!(extension_for("image/png"), Some("png"));
        assert_eq!(extension_for("IMAGE/JPEG"), Some("jpg"));
        assert_eq!(extension_for("application/pdf"), None);
    }

    #[tokio::test]
    async fn test_local_store_writes_file_and_returns_url() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path().join("nested"), "/uploads/");

        let url = store.put(b"\x89PNG fake", "png").await.unwrap();
        assert!(url.starts_with("/uploads/"));
        assert!(url.ends_with(".png"));

        let name = url.rsplit('/').next().unwrap();
        let stored = std::fs::read(dir.path().join("nested").join(name)).unwrap();
        assert_eq!(stored, b"\x89PNG fake");
    }
}
