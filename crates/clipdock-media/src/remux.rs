//! Lossless container rewrite via ffmpeg.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use clipdock_core::AppError;
use tokio::process::Command;
use tokio::time::timeout;

/// Progressive-download optimization: rewrite the container so its index
/// sits at the front of the file, without re-encoding any samples.
///
/// Implementations write to `output` and must never mutate `input`.
#[async_trait]
pub trait MediaRemuxer: Send + Sync {
    async fn remux_faststart(&self, input: &Path, output: &Path) -> Result<(), AppError>;
}

/// Remuxer backed by an `ffmpeg` subprocess doing a stream copy with
/// `-movflags faststart`.
pub struct FfmpegRemuxer {
    ffmpeg_path: String,
    timeout: Duration,
}

impl FfmpegRemuxer {
    pub fn new(ffmpeg_path: impl Into<String>, timeout: Duration) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
            timeout,
        }
    }
}

#[async_trait]
impl MediaRemuxer for FfmpegRemuxer {
    async fn remux_faststart(&self, input: &Path, output: &Path) -> Result<(), AppError> {
        let result = timeout(
            self.timeout,
            Command::new(&self.ffmpeg_path)
                .arg("-y")
                .arg("-i")
                .arg(input)
                .arg("-c")
                .arg("copy")
                .arg("-movflags")
                .arg("faststart")
                .arg("-f")
                .arg("mp4")
                .arg(output)
                .kill_on_drop(true)
                .output(),
        )
        .await
        .map_err(|_| {
            AppError::RemuxFailed(format!("ffmpeg timed out after {:?}", self.timeout))
        })?
        .map_err(|e| AppError::RemuxFailed(format!("failed to run ffmpeg: {e}")))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            tracing::error!(
                status = ?result.status.code(),
                stderr = %stderr,
                input = %input.display(),
                "ffmpeg exited with failure"
            );
            return Err(AppError::RemuxFailed(format!(
                "ffmpeg exited with status {}",
                result.status
            )));
        }

        // A zero-exit ffmpeg with nothing written still counts as a failure.
        let meta = tokio::fs::metadata(output)
            .await
            .map_err(|_| AppError::RemuxFailed("remuxed output is missing".to_string()))?;
        if meta.len() == 0 {
            return Err(AppError::RemuxFailed("remuxed output is empty".to_string()));
        }

        tracing::debug!(
            input = %input.display(),
            output = %output.display(),
            size_bytes = meta.len(),
            "remuxed for faststart"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_binary_is_remux_failed() {
        let remuxer = FfmpegRemuxer::new(
            "clipdock-test-definitely-not-ffmpeg",
            Duration::from_secs(5),
        );
        let scratch = tempfile::tempdir().expect("tempdir");
        let input = scratch.path().join("in.mp4");
        let output = scratch.path().join("out.mp4");
        tokio::fs::write(&input, b"not media").await.expect("write");

        let err = remuxer.remux_faststart(&input, &output).await.unwrap_err();
        assert!(matches!(err, AppError::RemuxFailed(_)));
    }
}
