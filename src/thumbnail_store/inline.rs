/// Inline (data URL) storage backend
use crate::{
    error::{ApiError, ApiResult},
    thumbnail_store::{DataUrl, ThumbnailBackend, ThumbnailRef, UploadedBlob},
};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use uuid::Uuid;

/// Encodes thumbnails directly into the video record as base64 data URLs.
///
/// No filesystem interaction; the reference is self-contained and carries
/// its own media type. Size is bounded only by the upload parse budget and
/// whatever limit the metadata store puts on the reference column.
#[derive(Debug, Clone, Default)]
pub struct InlineBackend;

#[async_trait]
impl ThumbnailBackend for InlineBackend {
    async fn store(&self, blob: UploadedBlob, _video_id: Uuid) -> ApiResult<ThumbnailRef> {
        let data_url = DataUrl {
            media_type: blob.media_type.to_string(),
            payload: BASE64.encode(&blob.data),
        };

        Ok(ThumbnailRef::Inline(data_url))
    }

    async fn resolve(&self, reference: &ThumbnailRef) -> ApiResult<(Vec<u8>, String)> {
        let data_url = match reference {
            ThumbnailRef::Inline(data_url) => data_url,
            ThumbnailRef::File(path) => {
                return Err(ApiError::CorruptReference(format!(
                    "inline backend cannot resolve file reference: {}",
                    path
                )))
            }
        };

        let bytes = BASE64.decode(data_url.payload.as_bytes()).map_err(|e| {
            ApiError::CorruptReference(format!("invalid base64 payload: {}", e))
        })?;

        Ok((bytes, data_url.media_type.clone()))
    }
}
