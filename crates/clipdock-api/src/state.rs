//! Application state shared across handlers.
//!
//! Collaborators are held as trait objects so handlers and the publish
//! pipeline stay decoupled from Postgres, S3, and the media tools; tests
//! substitute in-memory doubles.

use std::sync::Arc;

use clipdock_db::VideoStore;
use clipdock_storage::AssetStore;

use crate::services::publish::VideoPublishService;

pub struct AppState {
    /// Relational video-record store.
    pub videos: Arc<dyn VideoStore>,
    /// Local asset store thumbnails are copied into.
    pub assets: Arc<dyn AssetStore>,
    /// The video publish pipeline.
    pub publish: VideoPublishService,
    /// Ceiling on inbound thumbnail bytes.
    pub max_thumbnail_size_bytes: u64,
}
