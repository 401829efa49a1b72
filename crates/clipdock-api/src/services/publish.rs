//! Video publish pipeline
//!
//! Owns the request lifecycle for a video upload: ownership gate, bounded
//! temp staging, probe classification, faststart remux, object-key
//! derivation, store PUT, then the metadata update. The store write always
//! precedes the metadata write; temporary files are scope-owned and removed
//! on every exit path.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::extract::multipart::{Field, Multipart};
use clipdock_core::constants::{VIDEO_CONTENT_TYPE, VIDEO_FORM_FIELD};
use clipdock_core::models::Video;
use clipdock_core::AppError;
use clipdock_db::VideoStore;
use clipdock_media::{MediaProber, MediaRemuxer};
use clipdock_storage::{derive_object_key, ObjectStorage};
use tempfile::TempPath;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use super::authorize_owner;

/// Size ceiling and scratch location for staged uploads.
#[derive(Debug, Clone)]
pub struct PublishLimits {
    pub max_video_bytes: u64,
    pub scratch_dir: PathBuf,
}

/// The upload pipeline orchestrator.
pub struct VideoPublishService {
    videos: Arc<dyn VideoStore>,
    storage: Arc<dyn ObjectStorage>,
    prober: Arc<dyn MediaProber>,
    remuxer: Arc<dyn MediaRemuxer>,
    limits: PublishLimits,
}

impl VideoPublishService {
    pub fn new(
        videos: Arc<dyn VideoStore>,
        storage: Arc<dyn ObjectStorage>,
        prober: Arc<dyn MediaProber>,
        remuxer: Arc<dyn MediaRemuxer>,
        limits: PublishLimits,
    ) -> Self {
        Self {
            videos,
            storage,
            prober,
            remuxer,
            limits,
        }
    }

    /// Publish an uploaded video to the object store and record its URL.
    ///
    /// Every failure is terminal for the request; nothing is retried. The
    /// staged and remuxed temp files are removed no matter which branch
    /// exits.
    pub async fn publish(
        &self,
        user_id: Uuid,
        video_id: Uuid,
        mut multipart: Multipart,
    ) -> Result<Video, AppError> {
        // Authorization precedes resource consumption: no temp file exists
        // and no tool runs until the gate has passed.
        let mut video = authorize_owner(self.videos.as_ref(), user_id, video_id).await?;

        tracing::info!(video_id = %video_id, user_id = %user_id, "publishing video upload");

        let field = next_video_field(&mut multipart).await?;
        let content_type = field.content_type().map(str::to_owned).ok_or_else(|| {
            AppError::UnsupportedMediaType("missing content type on the video field".to_string())
        })?;
        if normalize_mime_type(&content_type) != VIDEO_CONTENT_TYPE {
            return Err(AppError::UnsupportedMediaType(format!(
                "unsupported content type {content_type}; only {VIDEO_CONTENT_TYPE} is accepted"
            )));
        }

        let staged = self.stage_field(field).await?;
        let orientation = self.prober.classify(&staged).await?;

        let remuxed = new_scratch_file(&self.limits.scratch_dir)?;
        self.remuxer.remux_faststart(&staged, &remuxed).await?;

        let key = derive_object_key(orientation);
        let data = tokio::fs::read(&remuxed)
            .await
            .map_err(|e| AppError::StorageIo(format!("failed to read remuxed file: {e}")))?;
        let url = self
            .storage
            .put_object(&key, VIDEO_CONTENT_TYPE, data)
            .await
            .map_err(|e| AppError::UploadFailed(e.to_string()))?;

        video.video_url = Some(url);
        if let Err(e) = self.videos.update_video(&video).await {
            // The object is durably stored but unreferenced. No automatic
            // compensation; log the orphan key for operators.
            tracing::warn!(
                video_id = %video.id,
                object_key = %key,
                error = %e,
                "metadata update failed after a successful store write; object is orphaned"
            );
            return Err(AppError::MetadataUpdateFailed(e.to_string()));
        }

        tracing::info!(
            video_id = %video.id,
            object_key = %key,
            orientation = %orientation,
            "video published"
        );
        Ok(video)
    }

    /// Stream the multipart field into a fresh exclusively-owned scratch
    /// file, enforcing the size ceiling without consuming the remainder.
    async fn stage_field(&self, mut field: Field<'_>) -> Result<TempPath, AppError> {
        let staged = new_scratch_file(&self.limits.scratch_dir)?;
        let mut file = tokio::fs::File::create(&staged)
            .await
            .map_err(|e| AppError::StorageIo(format!("failed to open staging file: {e}")))?;

        let mut written: u64 = 0;
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| AppError::InvalidInput(format!("failed to read upload stream: {e}")))?
        {
            written += chunk.len() as u64;
            if written > self.limits.max_video_bytes {
                return Err(AppError::PayloadTooLarge(format!(
                    "video exceeds the {} byte limit",
                    self.limits.max_video_bytes
                )));
            }
            file.write_all(&chunk)
                .await
                .map_err(|e| AppError::StorageIo(format!("failed to write staging file: {e}")))?;
        }

        // The probe and remux tools open the file by path; flush so they see
        // the full contents from the start of file.
        file.flush()
            .await
            .map_err(|e| AppError::StorageIo(format!("failed to flush staging file: {e}")))?;
        drop(file);

        tracing::debug!(size_bytes = written, path = %staged.display(), "staged upload");
        Ok(staged)
    }
}

/// Take the video field from the form. Exactly one field, named "video", is
/// accepted.
async fn next_video_field(multipart: &mut Multipart) -> Result<Field<'_>, AppError> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("failed to read multipart form: {e}")))?
        .ok_or_else(|| {
            AppError::InvalidInput(format!("missing multipart field '{VIDEO_FORM_FIELD}'"))
        })?;
    if field.name() != Some(VIDEO_FORM_FIELD) {
        return Err(AppError::InvalidInput(format!(
            "expected a single multipart field named '{VIDEO_FORM_FIELD}'"
        )));
    }
    Ok(field)
}

/// Create a fresh exclusively-owned scratch file; the returned `TempPath`
/// deletes it on drop, whichever way the request exits.
fn new_scratch_file(dir: &Path) -> Result<TempPath, AppError> {
    let file = tempfile::Builder::new()
        .prefix("clipdock-upload-")
        .suffix(".mp4")
        .tempfile_in(dir)
        .map_err(|e| AppError::StorageIo(format!("failed to create scratch file: {e}")))?;
    Ok(file.into_temp_path())
}

/// Strip MIME parameters ("video/mp4; codecs=avc1" -> "video/mp4").
fn normalize_mime_type(content_type: &str) -> &str {
    content_type
        .split(';')
        .next()
        .map(str::trim)
        .unwrap_or(content_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_mime_type() {
        assert_eq!(normalize_mime_type("video/mp4"), "video/mp4");
        assert_eq!(normalize_mime_type("video/mp4; codecs=avc1"), "video/mp4");
        assert_eq!(normalize_mime_type(" video/mp4 "), "video/mp4");
    }

    #[test]
    fn test_new_scratch_file_is_removed_on_drop() {
        let dir = tempfile::tempdir().expect("tempdir");
        let scratch = new_scratch_file(dir.path()).expect("scratch file");
        let path = scratch.to_path_buf();
        assert!(path.exists());
        drop(scratch);
        assert!(!path.exists());
    }
}
