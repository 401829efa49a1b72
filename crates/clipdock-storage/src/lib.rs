//! Clipdock Storage Library
//!
//! Storage abstractions and implementations: the durable object store that
//! published videos land in (S3 via `object_store`), and the local asset
//! store that thumbnails are copied to.
//!
//! # Object key format
//!
//! Published video keys are `{orientation}/{random-id}.mp4` where the random
//! id is 32 CSPRNG bytes, URL-safe base64 without padding. Key derivation is
//! centralized in the `keys` module.

pub mod keys;
pub mod local;
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use keys::derive_object_key;
pub use local::LocalAssetStore;
pub use s3::S3ObjectStorage;
pub use traits::{AssetStore, ObjectStorage, StorageError, StorageResult};
