//! Clipdock DB Library
//!
//! Relational persistence for video records. The `VideoStore` trait is the
//! seam the HTTP layer and the publish pipeline program against;
//! `PgVideoRepository` is its Postgres implementation via sqlx.

pub mod videos;

pub use videos::{PgVideoRepository, VideoStore};
