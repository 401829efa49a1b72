//! Media inspection via ffprobe.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use clipdock_core::models::Orientation;
use clipdock_core::AppError;
use serde::Deserialize;
use tokio::process::Command;
use tokio::time::timeout;

/// Read-only media inspection.
///
/// Classifies a local file's first media stream by aspect ratio. Never
/// modifies the input.
#[async_trait]
pub trait MediaProber: Send + Sync {
    async fn classify(&self, input: &Path) -> Result<Orientation, AppError>;
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    #[serde(default)]
    width: i64,
    #[serde(default)]
    height: i64,
}

/// Parse ffprobe's JSON output into the first stream's pixel dimensions.
fn parse_probe_output(stdout: &[u8]) -> Result<(i64, i64), AppError> {
    let parsed: ProbeOutput = serde_json::from_slice(stdout)
        .map_err(|e| AppError::ProbeFailed(format!("unparsable ffprobe output: {e}")))?;
    let stream = parsed
        .streams
        .first()
        .ok_or_else(|| AppError::ProbeFailed("no media streams reported".to_string()))?;
    Ok((stream.width, stream.height))
}

/// Prober backed by an `ffprobe` subprocess.
pub struct FfprobeProber {
    ffprobe_path: String,
    timeout: Duration,
}

impl FfprobeProber {
    pub fn new(ffprobe_path: impl Into<String>, timeout: Duration) -> Self {
        Self {
            ffprobe_path: ffprobe_path.into(),
            timeout,
        }
    }
}

#[async_trait]
impl MediaProber for FfprobeProber {
    async fn classify(&self, input: &Path) -> Result<Orientation, AppError> {
        let output = timeout(
            self.timeout,
            Command::new(&self.ffprobe_path)
                .arg("-v")
                .arg("error")
                .arg("-print_format")
                .arg("json")
                .arg("-show_streams")
                .arg(input)
                .kill_on_drop(true)
                .output(),
        )
        .await
        .map_err(|_| {
            AppError::ProbeFailed(format!("ffprobe timed out after {:?}", self.timeout))
        })?
        .map_err(|e| AppError::ProbeFailed(format!("failed to run ffprobe: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::error!(
                status = ?output.status.code(),
                stderr = %stderr,
                input = %input.display(),
                "ffprobe exited with failure"
            );
            return Err(AppError::ProbeFailed(format!(
                "ffprobe exited with status {}",
                output.status
            )));
        }

        let (width, height) = parse_probe_output(&output.stdout)?;
        let orientation = Orientation::classify(width, height);
        tracing::debug!(
            width,
            height,
            orientation = %orientation,
            input = %input.display(),
            "probed media dimensions"
        );
        Ok(orientation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_probe_output_takes_first_stream() {
        let json = br#"{
            "streams": [
                {"index": 0, "codec_type": "video", "width": 1280, "height": 720},
                {"index": 1, "codec_type": "audio"}
            ]
        }"#;
        assert_eq!(parse_probe_output(json).unwrap(), (1280, 720));
    }

    #[test]
    fn test_parse_probe_output_zero_streams() {
        let err = parse_probe_output(br#"{"streams": []}"#).unwrap_err();
        assert!(matches!(err, AppError::ProbeFailed(_)));
    }

    #[test]
    fn test_parse_probe_output_garbage() {
        let err = parse_probe_output(b"moov atom not found").unwrap_err();
        assert!(matches!(err, AppError::ProbeFailed(_)));
    }

    #[test]
    fn test_parse_probe_output_missing_dimensions_default_to_zero() {
        // An audio-only first stream has no width/height; the classifier
        // treats (0, 0) as Other rather than failing.
        let json = br#"{"streams": [{"index": 0, "codec_type": "audio"}]}"#;
        assert_eq!(parse_probe_output(json).unwrap(), (0, 0));
    }

    #[tokio::test]
    async fn test_missing_binary_is_probe_failed() {
        let prober = FfprobeProber::new(
            "clipdock-test-definitely-not-ffprobe",
            Duration::from_secs(5),
        );
        let err = prober
            .classify(Path::new("/nonexistent/input.mp4"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ProbeFailed(_)));
    }
}
