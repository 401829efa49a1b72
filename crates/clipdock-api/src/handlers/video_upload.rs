use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use clipdock_core::models::VideoResponse;
use uuid::Uuid;

use crate::auth::models::CurrentUser;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/videos/{video_id}/video",
    tag = "videos",
    params(
        ("video_id" = Uuid, Path, description = "Video record the upload publishes to")
    ),
    responses(
        (status = 200, description = "Video published", body = VideoResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the video", body = ErrorResponse),
        (status = 404, description = "Video record not found", body = ErrorResponse),
        (status = 413, description = "Video exceeds the size limit", body = ErrorResponse),
        (status = 415, description = "Unsupported container type", body = ErrorResponse),
        (status = 500, description = "Pipeline failure", body = ErrorResponse)
    )
)]
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(video_id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<VideoResponse>, HttpAppError> {
    let video = state
        .publish
        .publish(user.user_id, video_id, multipart)
        .await?;
    Ok(Json(VideoResponse::from(video)))
}
