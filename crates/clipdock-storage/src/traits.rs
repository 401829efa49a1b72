//! Storage abstraction traits

use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Durable object store the publish pipeline writes to.
///
/// The public URL is deterministically derivable from the store identity and
/// the key; there is no redirect or CDN indirection in front of it.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Upload `data` under `key` with the given content type as object
    /// metadata. Returns the public URL of the stored object.
    async fn put_object(
        &self,
        key: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<String>;

    /// Public URL an object stored under `key` is served from.
    fn object_url(&self, key: &str) -> String;
}

/// Key-value store for small locally served assets (thumbnails).
///
/// Injected into the handler rather than held as process-wide state, so its
/// lifetime is store-scoped and nothing mutable is shared between requests.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Store `data` under `name`; returns the public URL of the asset.
    async fn put(&self, name: &str, data: Vec<u8>) -> StorageResult<String>;
}
