//! Clipdock core library
//!
//! Shared foundation for the clipdock crates: the unified error taxonomy,
//! environment-driven configuration, and the domain models (video records and
//! aspect-ratio classification).

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

pub use config::{Config, ConfigError};
pub use error::{AppError, ErrorMetadata, LogLevel};
