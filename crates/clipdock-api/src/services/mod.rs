//! Request-scoped services.

pub mod publish;

use clipdock_core::models::Video;
use clipdock_core::AppError;
use clipdock_db::VideoStore;
use uuid::Uuid;

/// Ownership/validation gate.
///
/// Resolves the target record and checks it against the caller identity.
/// Runs to completion before any temporary file is created or any external
/// tool is invoked; failures here have no side effects.
pub async fn authorize_owner(
    videos: &dyn VideoStore,
    user_id: Uuid,
    video_id: Uuid,
) -> Result<Video, AppError> {
    let video = videos
        .get_video(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("video {video_id} does not exist")))?;
    if video.user_id != user_id {
        return Err(AppError::Forbidden(
            "video is not owned by the authenticated user".to_string(),
        ));
    }
    Ok(video)
}
