//! Shared constants.

/// The single supported video container content type.
pub const VIDEO_CONTENT_TYPE: &str = "video/mp4";

/// File extension for the supported video container.
pub const VIDEO_EXTENSION: &str = "mp4";

/// Multipart form field carrying the video bytes.
pub const VIDEO_FORM_FIELD: &str = "video";

/// Multipart form field carrying the thumbnail bytes.
pub const THUMBNAIL_FORM_FIELD: &str = "thumbnail";
