/// File-based storage backend under the configured asset root
use crate::{
    error::{ApiError, ApiResult},
    thumbnail_store::{ThumbnailBackend, ThumbnailRef, UploadedBlob},
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

/// URL prefix under which the asset root is served
pub const ASSET_URL_PREFIX: &str = "/assets/";

/// Disk storage backend
///
/// Writes one file per video, named `<video_id>.<extension>`, under the
/// asset root. Re-uploading for the same video overwrites in place; two
/// concurrent writers for the same video race and the last one wins.
///
/// The content type on the read path is re-derived from the file extension;
/// no content-type sidecar is persisted. This is a weaker guarantee than the
/// inline strategy, which carries the declared type inside the reference.
#[derive(Debug, Clone)]
pub struct DiskBackend {
    asset_root: PathBuf,
}

impl DiskBackend {
    pub fn new(asset_root: PathBuf) -> Self {
        Self { asset_root }
    }

    /// Map a rooted `/assets/<name>` URL path back to a file under the root
    fn file_path(&self, url_path: &str) -> ApiResult<PathBuf> {
        let name = url_path.strip_prefix(ASSET_URL_PREFIX).ok_or_else(|| {
            ApiError::CorruptReference(format!(
                "file reference is not under {}: {}",
                ASSET_URL_PREFIX, url_path
            ))
        })?;

        // Reject anything that could escape the asset root
        if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
            return Err(ApiError::CorruptReference(format!(
                "invalid asset file name: {}",
                name
            )));
        }

        Ok(self.asset_root.join(name))
    }

    /// Re-derive a content type from a file extension
    fn content_type_for(url_path: &str) -> ApiResult<String> {
        let extension = Path::new(url_path)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .ok_or_else(|| {
                ApiError::CorruptReference(format!(
                    "asset file name has no extension: {}",
                    url_path
                ))
            })?;

        let content_type = match extension.as_str() {
            "jpeg" | "jpg" => "image/jpeg",
            "png" => "image/png",
            "gif" => "image/gif",
            "webp" => "image/webp",
            other => {
                return Err(ApiError::CorruptReference(format!(
                    "cannot derive a media type from extension: {}",
                    other
                )))
            }
        };

        Ok(content_type.to_string())
    }
}

#[async_trait]
impl ThumbnailBackend for DiskBackend {
    async fn store(&self, blob: UploadedBlob, video_id: Uuid) -> ApiResult<ThumbnailRef> {
        fs::create_dir_all(&self.asset_root).await.map_err(|e| {
            ApiError::StorageUnavailable(format!(
                "failed to create asset root {}: {}",
                self.asset_root.display(),
                e
            ))
        })?;

        let file_name = format!("{}.{}", video_id, blob.media_type.extension());
        let path = self.asset_root.join(&file_name);

        fs::write(&path, &blob.data).await.map_err(|e| {
            ApiError::StorageUnavailable(format!(
                "failed to write thumbnail {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(ThumbnailRef::File(format!(
            "{}{}",
            ASSET_URL_PREFIX, file_name
        )))
    }

    async fn resolve(&self, reference: &ThumbnailRef) -> ApiResult<(Vec<u8>, String)> {
        let url_path = match reference {
            ThumbnailRef::File(path) => path,
            ThumbnailRef::Inline(_) => {
                return Err(ApiError::CorruptReference(
                    "disk backend cannot resolve an inline reference".to_string(),
                ))
            }
        };

        let content_type = Self::content_type_for(url_path)?;
        let path = self.file_path(url_path)?;

        match fs::read(&path).await {
            Ok(data) => Ok((data, content_type)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ApiError::NotFound(
                format!("thumbnail file missing: {}", url_path),
            )),
            Err(e) => Err(ApiError::StorageUnavailable(format!(
                "failed to read thumbnail {}: {}",
                path.display(),
                e
            ))),
        }
    }
}
