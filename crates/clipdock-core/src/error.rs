//! Error types module
//!
//! The unified `AppError` enum carries the full failure taxonomy of the
//! publish pipeline plus the ambient database/input/internal variants. The
//! `ErrorMetadata` trait lets each variant self-describe how it should be
//! presented over HTTP (status, machine-readable code, client-safe message,
//! sensitivity, log level).

use std::io;

use sqlx::Error as SqlxError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "PROBE_FAILED")
    fn error_code(&self) -> &'static str;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether internal details must be hidden from the caller
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("local storage I/O error: {0}")]
    StorageIo(String),

    #[error("media probe failed: {0}")]
    ProbeFailed(String),

    #[error("remux failed: {0}")]
    RemuxFailed(String),

    #[error("object upload failed: {0}")]
    UploadFailed(String),

    #[error("metadata update failed: {0}")]
    MetadataUpdateFailed(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("database error: {0}")]
    Database(#[source] SqlxError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::StorageIo(err.to_string())
    }
}

/// Static metadata per variant: (http_status, error_code, sensitive, log_level).
/// client_message stays per-variant for dynamic content.
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, bool, LogLevel) {
    match err {
        AppError::Unauthenticated(_) => (401, "UNAUTHENTICATED", false, LogLevel::Debug),
        AppError::Forbidden(_) => (403, "FORBIDDEN", false, LogLevel::Debug),
        AppError::NotFound(_) => (404, "NOT_FOUND", false, LogLevel::Debug),
        AppError::UnsupportedMediaType(_) => {
            (415, "UNSUPPORTED_MEDIA_TYPE", false, LogLevel::Debug)
        }
        AppError::PayloadTooLarge(_) => (413, "PAYLOAD_TOO_LARGE", false, LogLevel::Debug),
        AppError::StorageIo(_) => (500, "STORAGE_IO_ERROR", true, LogLevel::Error),
        AppError::ProbeFailed(_) => (500, "PROBE_FAILED", true, LogLevel::Error),
        AppError::RemuxFailed(_) => (500, "REMUX_FAILED", true, LogLevel::Error),
        AppError::UploadFailed(_) => (500, "UPLOAD_FAILED", true, LogLevel::Error),
        AppError::MetadataUpdateFailed(_) => {
            (500, "METADATA_UPDATE_FAILED", true, LogLevel::Error)
        }
        AppError::InvalidInput(_) => (400, "INVALID_INPUT", false, LogLevel::Debug),
        AppError::Database(_) => (500, "DATABASE_ERROR", true, LogLevel::Error),
        AppError::Internal(_) => (500, "INTERNAL_ERROR", true, LogLevel::Error),
    }
}

impl AppError {
    /// Error type name for logging.
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Unauthenticated(_) => "Unauthenticated",
            AppError::Forbidden(_) => "Forbidden",
            AppError::NotFound(_) => "NotFound",
            AppError::UnsupportedMediaType(_) => "UnsupportedMediaType",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::StorageIo(_) => "StorageIo",
            AppError::ProbeFailed(_) => "ProbeFailed",
            AppError::RemuxFailed(_) => "RemuxFailed",
            AppError::UploadFailed(_) => "UploadFailed",
            AppError::MetadataUpdateFailed(_) => "MetadataUpdateFailed",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::Database(_) => "Database",
            AppError::Internal(_) => "Internal",
        }
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).3
    }

    fn client_message(&self) -> String {
        match self {
            // Non-sensitive variants surface their message as-is.
            AppError::Unauthenticated(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg)
            | AppError::UnsupportedMediaType(msg)
            | AppError::PayloadTooLarge(msg)
            | AppError::InvalidInput(msg) => msg.clone(),
            // Sensitive variants never leak subprocess/storage internals.
            AppError::StorageIo(_) => "Failed to store the uploaded file".to_string(),
            AppError::ProbeFailed(_) => "Failed to inspect the video file".to_string(),
            AppError::RemuxFailed(_) => "Failed to process the video file".to_string(),
            AppError::UploadFailed(_) => "Failed to publish the video".to_string(),
            AppError::MetadataUpdateFailed(_) => {
                "Failed to record the published video".to_string()
            }
            AppError::Database(_) => "Failed to access database".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_forbidden() {
        let err = AppError::Forbidden("video is not owned by the authenticated user".to_string());
        assert_eq!(err.http_status_code(), 403);
        assert_eq!(err.error_code(), "FORBIDDEN");
        assert!(!err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Debug);
        assert_eq!(
            err.client_message(),
            "video is not owned by the authenticated user"
        );
    }

    #[test]
    fn test_error_metadata_probe_failed_hides_details() {
        let err = AppError::ProbeFailed("ffprobe exited with status 1: stderr junk".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.error_code(), "PROBE_FAILED");
        assert!(err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Error);
        assert!(!err.client_message().contains("ffprobe"));
    }

    #[test]
    fn test_error_metadata_unsupported_media_type() {
        let err = AppError::UnsupportedMediaType("only video/mp4 is accepted".to_string());
        assert_eq!(err.http_status_code(), 415);
        assert_eq!(err.error_code(), "UNSUPPORTED_MEDIA_TYPE");
        assert_eq!(err.client_message(), "only video/mp4 is accepted");
    }

    #[test]
    fn test_error_metadata_payload_too_large() {
        let err = AppError::PayloadTooLarge("video exceeds the 1073741824 byte limit".to_string());
        assert_eq!(err.http_status_code(), 413);
        assert_eq!(err.error_code(), "PAYLOAD_TOO_LARGE");
    }

    #[test]
    fn test_io_error_maps_to_storage_io() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err = AppError::from(io_err);
        assert_eq!(err.error_code(), "STORAGE_IO_ERROR");
        assert!(err.is_sensitive());
    }

    #[test]
    fn test_database_error_conversion() {
        let err = AppError::from(SqlxError::PoolClosed);
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.error_code(), "DATABASE_ERROR");
        assert_eq!(err.client_message(), "Failed to access database");
    }
}
