use crate::traits::{AssetStore, StorageError, StorageResult};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;

/// Local filesystem asset store.
///
/// Stores thumbnails as flat files under a root directory; they are served
/// back by the HTTP layer under `/assets`.
#[derive(Clone)]
pub struct LocalAssetStore {
    root: PathBuf,
    base_url: String,
}

impl LocalAssetStore {
    /// Create a new LocalAssetStore rooted at `root`.
    ///
    /// # Arguments
    /// * `root` - Directory assets are written to (created if missing)
    /// * `base_url` - Public base URL of the server (e.g., "http://localhost:8080")
    pub async fn new(root: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let root = root.into();

        fs::create_dir_all(&root).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create asset directory {}: {}",
                root.display(),
                e
            ))
        })?;

        Ok(LocalAssetStore {
            root,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Validate an asset name. Names are flat: no separators, no traversal.
    fn validate_name(name: &str) -> StorageResult<()> {
        if name.is_empty()
            || name.contains("..")
            || name.contains('/')
            || name.contains('\\')
        {
            return Err(StorageError::InvalidKey(format!(
                "invalid asset name: {name}"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl AssetStore for LocalAssetStore {
    async fn put(&self, name: &str, data: Vec<u8>) -> StorageResult<String> {
        Self::validate_name(name)?;

        let path = self.root.join(name);
        fs::write(&path, data).await?;

        tracing::debug!(path = %path.display(), "asset stored");
        Ok(format!("{}/assets/{}", self.base_url, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_writes_file_and_returns_url() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = LocalAssetStore::new(dir.path(), "http://localhost:8080/".to_string())
            .await
            .expect("store");

        let url = store
            .put("video-1.jpg", b"jpeg bytes".to_vec())
            .await
            .expect("put");

        assert_eq!(url, "http://localhost:8080/assets/video-1.jpg");
        let written = tokio::fs::read(dir.path().join("video-1.jpg"))
            .await
            .expect("read back");
        assert_eq!(written, b"jpeg bytes");
    }

    #[tokio::test]
    async fn test_put_rejects_traversal() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = LocalAssetStore::new(dir.path(), "http://localhost:8080".to_string())
            .await
            .expect("store");

        for bad in ["../escape.jpg", "a/b.jpg", "", "..\\x.jpg"] {
            let result = store.put(bad, vec![1]).await;
            assert!(
                matches!(result, Err(StorageError::InvalidKey(_))),
                "{bad:?} should be rejected"
            );
        }
    }
}
