//! Application setup and initialization
//!
//! All application initialization logic lives here instead of main.rs.

pub mod database;
pub mod routes;
pub mod server;
pub mod services;
pub mod storage;

use std::sync::Arc;

use anyhow::Result;
use clipdock_core::Config;

use crate::auth::middleware::AuthState;
use crate::state::AppState;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Setup database
    let pool = database::setup_database(&config).await?;

    // Setup storage backends
    let (object_storage, asset_store) = storage::setup_storage(&config).await?;

    // Wire services and repositories
    let state = services::initialize_services(&config, pool, object_storage, asset_store);

    // Setup routes
    let auth_state = Arc::new(AuthState::new(config.jwt_secret()));
    // Slack on top of the video ceiling for multipart framing overhead
    let max_body_bytes = config.max_video_size_bytes() as usize + (1 << 20);
    let router = routes::build_router(
        state.clone(),
        auth_state,
        config.assets_root(),
        max_body_bytes,
    );

    Ok((state, router))
}
