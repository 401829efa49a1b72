//! Application configuration
//!
//! All configuration comes from the environment, read once at startup via
//! [`Config::from_env`]. Fields are private; consumers go through getters so
//! defaults and derived values stay in one place.

use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid value for environment variable {name}: {value}")]
    InvalidVar { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    server_port: u16,
    public_base_url: String,
    database_url: String,
    db_max_connections: u32,
    jwt_secret: String,
    s3_bucket: String,
    s3_region: String,
    s3_endpoint: Option<String>,
    assets_root: PathBuf,
    scratch_dir: PathBuf,
    max_video_size_bytes: u64,
    max_thumbnail_size_bytes: u64,
    ffprobe_path: String,
    ffmpeg_path: String,
    tool_timeout_secs: u64,
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

fn parse_or<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidVar { name, value }),
        Err(_) => Ok(default),
    }
}

impl Config {
    /// Load configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let server_port: u16 = parse_or("SERVER_PORT", 8080)?;
        let public_base_url = optional("PUBLIC_BASE_URL")
            .unwrap_or_else(|| format!("http://localhost:{server_port}"));

        Ok(Config {
            server_port,
            public_base_url,
            database_url: require("DATABASE_URL")?,
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", 5)?,
            jwt_secret: require("JWT_SECRET")?,
            s3_bucket: require("S3_BUCKET")?,
            s3_region: require("S3_REGION")?,
            s3_endpoint: optional("S3_ENDPOINT"),
            assets_root: PathBuf::from(
                optional("ASSETS_ROOT").unwrap_or_else(|| "./assets".to_string()),
            ),
            scratch_dir: optional("SCRATCH_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(env::temp_dir),
            // 1 GiB hard ceiling on inbound video bytes
            max_video_size_bytes: parse_or("MAX_VIDEO_SIZE_BYTES", 1 << 30)?,
            max_thumbnail_size_bytes: parse_or("MAX_THUMBNAIL_SIZE_BYTES", 10 << 20)?,
            ffprobe_path: optional("FFPROBE_PATH").unwrap_or_else(|| "ffprobe".to_string()),
            ffmpeg_path: optional("FFMPEG_PATH").unwrap_or_else(|| "ffmpeg".to_string()),
            tool_timeout_secs: parse_or("TOOL_TIMEOUT_SECS", 30)?,
        })
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn public_base_url(&self) -> &str {
        &self.public_base_url
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    pub fn s3_bucket(&self) -> &str {
        &self.s3_bucket
    }

    pub fn s3_region(&self) -> &str {
        &self.s3_region
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.s3_endpoint.as_deref()
    }

    pub fn assets_root(&self) -> &Path {
        &self.assets_root
    }

    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }

    pub fn max_video_size_bytes(&self) -> u64 {
        self.max_video_size_bytes
    }

    pub fn max_thumbnail_size_bytes(&self) -> u64 {
        self.max_thumbnail_size_bytes
    }

    pub fn ffprobe_path(&self) -> &str {
        &self.ffprobe_path
    }

    pub fn ffmpeg_path(&self) -> &str {
        &self.ffmpeg_path
    }

    pub fn tool_timeout(&self) -> Duration {
        Duration::from_secs(self.tool_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_uses_default_when_unset() {
        let value: u64 = parse_or("CLIPDOCK_TEST_UNSET_VAR", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_parse_or_rejects_garbage() {
        env::set_var("CLIPDOCK_TEST_GARBAGE_VAR", "not-a-number");
        let result: Result<u64, _> = parse_or("CLIPDOCK_TEST_GARBAGE_VAR", 0);
        assert!(matches!(result, Err(ConfigError::InvalidVar { .. })));
        env::remove_var("CLIPDOCK_TEST_GARBAGE_VAR");
    }

    #[test]
    fn test_optional_filters_empty() {
        env::set_var("CLIPDOCK_TEST_EMPTY_VAR", "");
        assert_eq!(optional("CLIPDOCK_TEST_EMPTY_VAR"), None);
        env::remove_var("CLIPDOCK_TEST_EMPTY_VAR");
    }
}
