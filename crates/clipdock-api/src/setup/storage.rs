//! Storage setup and initialization

use std::sync::Arc;

use anyhow::Result;
use clipdock_core::Config;
use clipdock_storage::{AssetStore, LocalAssetStore, ObjectStorage, S3ObjectStorage};

/// Build the object store videos publish to and the local asset store
/// thumbnails are copied into.
pub async fn setup_storage(
    config: &Config,
) -> Result<(Arc<dyn ObjectStorage>, Arc<dyn AssetStore>)> {
    let s3 = S3ObjectStorage::new(
        config.s3_bucket().to_string(),
        config.s3_region().to_string(),
        config.s3_endpoint().map(String::from),
    )?;
    tracing::info!(
        bucket = %config.s3_bucket(),
        region = %config.s3_region(),
        endpoint = ?config.s3_endpoint(),
        "Object storage initialized"
    );

    let assets = LocalAssetStore::new(
        config.assets_root(),
        config.public_base_url().to_string(),
    )
    .await?;
    tracing::info!(root = %config.assets_root().display(), "Asset store initialized");

    Ok((Arc::new(s3), Arc::new(assets)))
}
