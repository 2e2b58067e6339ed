/// Thumbnail blob storage
///
/// Persists raw thumbnail bytes and produces retrievable references. Two
/// interchangeable strategies sit behind one trait: inline data URLs
/// embedded in the video record, and files under a served asset root.
/// Picking one trades database bloat (inline) against filesystem cleanup
/// responsibility (file).

pub mod disk;
pub mod inline;
pub mod models;

pub use models::{DataUrl, ThumbnailRef, UploadedBlob};

use crate::error::{ApiError, ApiResult};
use async_trait::async_trait;
use disk::DiskBackend;
use inline::InlineBackend;
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

/// Thumbnail storage backend trait
///
/// Implementations persist an uploaded blob for a video and resolve a
/// stored reference back to bytes plus a content type.
#[async_trait]
pub trait ThumbnailBackend: Send + Sync {
    /// Persist the blob and return its stored reference
    async fn store(&self, blob: UploadedBlob, video_id: Uuid) -> ApiResult<ThumbnailRef>;

    /// Resolve a stored reference back to bytes and a content type
    async fn resolve(&self, reference: &ThumbnailRef) -> ApiResult<(Vec<u8>, String)>;
}

/// Which backend receives new uploads
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageStrategy {
    /// Embed the image as a base64 data URL in the video record
    Inline,
    /// Write the image under the asset root and record a rooted path
    File,
}

/// Configuration for the thumbnail store
#[derive(Debug, Clone)]
pub struct ThumbnailStoreConfig {
    pub strategy: StorageStrategy,
    pub asset_root: PathBuf,
    /// Byte ceiling for a single uploaded thumbnail
    pub max_upload_size: usize,
}

/// Main thumbnail store
///
/// Writes go through the configured strategy. Reads dispatch on the
/// reference tag, so records written under either strategy stay readable
/// after a configuration switch.
#[derive(Clone)]
pub struct ThumbnailStore {
    config: ThumbnailStoreConfig,
    inline: Arc<InlineBackend>,
    disk: Arc<DiskBackend>,
}

impl ThumbnailStore {
    pub fn new(config: ThumbnailStoreConfig) -> Self {
        let disk = Arc::new(DiskBackend::new(config.asset_root.clone()));

        Self {
            config,
            inline: Arc::new(InlineBackend),
            disk,
        }
    }

    /// Persist an uploaded blob and return the reference to record.
    ///
    /// An upload exactly at the size budget is accepted; one byte over is
    /// rejected before any backend I/O happens.
    pub async fn store(&self, blob: UploadedBlob, video_id: Uuid) -> ApiResult<ThumbnailRef> {
        if blob.data.len() > self.config.max_upload_size {
            return Err(ApiError::BadRequest(format!(
                "thumbnail is {} bytes, over the {} byte upload budget",
                blob.data.len(),
                self.config.max_upload_size
            )));
        }

        match self.config.strategy {
            StorageStrategy::Inline => self.inline.store(blob, video_id).await,
            StorageStrategy::File => self.disk.store(blob, video_id).await,
        }
    }

    /// Resolve a stored reference; the tag picks the backend
    pub async fn resolve(&self, reference: &ThumbnailRef) -> ApiResult<(Vec<u8>, String)> {
        match reference {
            ThumbnailRef::Inline(_) => self.inline.resolve(reference).await,
            ThumbnailRef::File(_) => self.disk.resolve(reference).await,
        }
    }
}
