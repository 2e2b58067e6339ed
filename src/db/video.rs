/// Video metadata store
use crate::error::{ApiError, ApiResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

/// Video record in the metadata store.
///
/// Only the owning user may change its thumbnail reference.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    /// Stored thumbnail reference: inline data URL or rooted asset path
    pub thumbnail_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Parameters for creating a video record
#[derive(Debug, Clone, Deserialize)]
pub struct NewVideo {
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
}

/// Typed access to the `videos` table
#[derive(Clone)]
pub struct VideoStore {
    db: SqlitePool,
}

impl VideoStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Create a video record with no thumbnail
    pub async fn create_video(&self, new: NewVideo) -> ApiResult<VideoRecord> {
        let now = Utc::now();
        let video = VideoRecord {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            title: new.title,
            description: new.description,
            thumbnail_url: None,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO videos (id, user_id, title, description, thumbnail_url, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(video.id)
        .bind(video.user_id)
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.thumbnail_url)
        .bind(video.created_at)
        .bind(video.updated_at)
        .execute(&self.db)
        .await
        .map_err(ApiError::Database)?;

        Ok(video)
    }

    /// Look up a video by identifier
    pub async fn get_video(&self, id: Uuid) -> ApiResult<Option<VideoRecord>> {
        let video = sqlx::query_as::<_, VideoRecord>(
            r#"
            SELECT id, user_id, title, description, thumbnail_url, created_at, updated_at
            FROM videos
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .map_err(ApiError::Database)?;

        Ok(video)
    }

    /// Replace the thumbnail reference and bump the update timestamp.
    ///
    /// Returns the updated record. A persistence failure surfaces as
    /// `UpdateFailed`; any blob already stored for this update is left
    /// behind, not rolled back.
    pub async fn update_thumbnail(&self, id: Uuid, thumbnail_url: &str) -> ApiResult<VideoRecord> {
        let result = sqlx::query(
            r#"
            UPDATE videos
            SET thumbnail_url = ?1, updated_at = ?2
            WHERE id = ?3
            "#,
        )
        .bind(thumbnail_url)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.db)
        .await
        .map_err(|e| {
            ApiError::UpdateFailed(format!("failed to persist thumbnail reference: {}", e))
        })?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound(format!("no video with ID {}", id)));
        }

        self.get_video(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("no video with ID {}", id)))
    }
}
