//! Video record repository.

use async_trait::async_trait;
use chrono::Utc;
use clipdock_core::models::Video;
use clipdock_core::AppError;
use sqlx::PgPool;
use uuid::Uuid;

/// Relational store of video records.
///
/// The publish pipeline only ever reads a record and, after a confirmed
/// object-store write, updates it; records are created and deleted by other
/// parts of the product.
#[async_trait]
pub trait VideoStore: Send + Sync {
    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError>;

    async fn update_video(&self, video: &Video) -> Result<(), AppError>;

    async fn list_videos(&self, user_id: Uuid) -> Result<Vec<Video>, AppError>;
}

/// Postgres-backed video repository.
#[derive(Clone)]
pub struct PgVideoRepository {
    pool: PgPool,
}

impl PgVideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VideoStore for PgVideoRepository {
    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        let video = sqlx::query_as::<_, Video>(
            "SELECT id, user_id, title, description, video_url, thumbnail_url, \
                    created_at, updated_at \
             FROM videos WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(video)
    }

    async fn update_video(&self, video: &Video) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE videos \
             SET title = $2, description = $3, video_url = $4, thumbnail_url = $5, \
                 updated_at = $6 \
             WHERE id = $1",
        )
        .bind(video.id)
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.video_url)
        .bind(&video.thumbnail_url)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "video {} does not exist",
                video.id
            )));
        }
        Ok(())
    }

    async fn list_videos(&self, user_id: Uuid) -> Result<Vec<Video>, AppError> {
        let videos = sqlx::query_as::<_, Video>(
            "SELECT id, user_id, title, description, video_url, thumbnail_url, \
                    created_at, updated_at \
             FROM videos WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(videos)
    }
}
