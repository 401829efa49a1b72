use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use clipdock_core::constants::THUMBNAIL_FORM_FIELD;
use clipdock_core::models::VideoResponse;
use clipdock_core::AppError;
use uuid::Uuid;

use crate::auth::models::CurrentUser;
use crate::error::{ErrorResponse, HttpAppError};
use crate::services::authorize_owner;
use crate::state::AppState;

/// Map an allowed thumbnail content type to its file extension.
fn thumbnail_extension(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        _ => None,
    }
}

#[utoipa::path(
    post,
    path = "/api/videos/{video_id}/thumbnail",
    tag = "videos",
    params(
        ("video_id" = Uuid, Path, description = "Video record the thumbnail belongs to")
    ),
    responses(
        (status = 200, description = "Thumbnail stored", body = VideoResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the video", body = ErrorResponse),
        (status = 404, description = "Video record not found", body = ErrorResponse),
        (status = 413, description = "Thumbnail exceeds the size limit", body = ErrorResponse),
        (status = 415, description = "Unsupported image type", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn upload_thumbnail(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(video_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<VideoResponse>, HttpAppError> {
    // Ownership gate before any byte is read.
    let mut video = authorize_owner(state.videos.as_ref(), user.user_id, video_id).await?;

    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("failed to read multipart form: {e}")))?
        .ok_or_else(|| {
            AppError::InvalidInput(format!("missing multipart field '{THUMBNAIL_FORM_FIELD}'"))
        })?;
    if field.name() != Some(THUMBNAIL_FORM_FIELD) {
        return Err(AppError::InvalidInput(format!(
            "expected a single multipart field named '{THUMBNAIL_FORM_FIELD}'"
        ))
        .into());
    }

    let content_type = field.content_type().map(str::to_owned).ok_or_else(|| {
        AppError::UnsupportedMediaType("missing content type on the thumbnail field".to_string())
    })?;
    let extension = thumbnail_extension(&content_type).ok_or_else(|| {
        AppError::UnsupportedMediaType(format!(
            "unsupported thumbnail type {content_type}; expected image/jpeg, image/png or image/gif"
        ))
    })?;

    let data = field
        .bytes()
        .await
        .map_err(|e| AppError::InvalidInput(format!("failed to read thumbnail data: {e}")))?;
    if data.len() as u64 > state.max_thumbnail_size_bytes {
        return Err(AppError::PayloadTooLarge(format!(
            "thumbnail exceeds the {} byte limit",
            state.max_thumbnail_size_bytes
        ))
        .into());
    }

    let name = format!("{video_id}.{extension}");
    let url = state.assets.put(&name, data.to_vec()).await?;

    video.thumbnail_url = Some(url);
    state.videos.update_video(&video).await?;

    tracing::info!(video_id = %video.id, asset = %name, "thumbnail stored");
    Ok(Json(VideoResponse::from(video)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thumbnail_extension_allowlist() {
        assert_eq!(thumbnail_extension("image/jpeg"), Some("jpg"));
        assert_eq!(thumbnail_extension("image/png"), Some("png"));
        assert_eq!(thumbnail_extension("image/gif"), Some("gif"));
        assert_eq!(thumbnail_extension("image/webp"), None);
        assert_eq!(thumbnail_extension("video/mp4"), None);
    }
}
