/// Application context and dependency injection
use crate::{
    config::ServerConfig,
    db::{self, video::VideoStore},
    error::ApiResult,
    thumbnail_store::{ThumbnailStore, ThumbnailStoreConfig},
};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Application context holding all shared services.
///
/// Configuration is read-only for the lifetime of the process; request
/// handlers share nothing else.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<ServerConfig>,
    pub video_db: SqlitePool,
    pub videos: Arc<VideoStore>,
    pub thumbnails: Arc<ThumbnailStore>,
}

impl AppContext {
    /// Create a new application context from configuration
    pub async fn new(config: ServerConfig) -> ApiResult<Self> {
        config.validate()?;

        Self::ensure_directories(&config).await?;

        let video_db = db::create_pool(&config.storage.video_db, db::DatabaseOptions::default())
            .await?;
        db::run_migrations(&video_db).await?;
        db::test_connection(&video_db).await?;

        let videos = Arc::new(VideoStore::new(video_db.clone()));

        let thumbnails = Arc::new(ThumbnailStore::new(ThumbnailStoreConfig {
            strategy: config.storage.strategy,
            asset_root: config.storage.asset_root.clone(),
            max_upload_size: config.service.upload_limit,
        }));

        Ok(Self {
            config: Arc::new(config),
            video_db,
            videos,
            thumbnails,
        })
    }

    /// Ensure required directories exist
    async fn ensure_directories(config: &ServerConfig) -> ApiResult<()> {
        for dir in [&config.storage.data_directory, &config.storage.asset_root] {
            if !dir.exists() {
                tokio::fs::create_dir_all(dir).await?;
            }
        }

        Ok(())
    }

    /// Get service URL
    pub fn service_url(&self) -> String {
        format!(
            "http://{}:{}",
            self.config.service.hostname, self.config.service.port
        )
    }
}
