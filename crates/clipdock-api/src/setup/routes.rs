//! Route configuration and setup.

use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get, post},
    Json, Router,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::api_doc::ApiDoc;
use crate::auth::middleware::{auth_middleware, AuthState};
use crate::handlers;
use crate::state::AppState;

/// Build the application router.
///
/// Everything under `/api/videos` sits behind the auth middleware; health,
/// the OpenAPI document, and locally stored thumbnail assets are public.
pub fn build_router(
    state: Arc<AppState>,
    auth_state: Arc<AuthState>,
    assets_root: &Path,
    max_body_bytes: usize,
) -> Router {
    let protected = Router::new()
        .route("/api/videos", get(handlers::videos::list_videos))
        .route("/api/videos/{video_id}", get(handlers::videos::get_video))
        .route(
            "/api/videos/{video_id}/video",
            post(handlers::video_upload::upload_video),
        )
        .route(
            "/api/videos/{video_id}/thumbnail",
            post(handlers::thumbnail_upload::upload_thumbnail),
        )
        .route_layer(from_fn_with_state(auth_state, auth_middleware));

    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/docs/openapi.json", get(openapi))
        .nest_service("/assets", ServeDir::new(assets_root))
        .merge(protected)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness probe - process is running.
async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
