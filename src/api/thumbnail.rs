/// Thumbnail upload and serving endpoints
use crate::{
    auth::AuthContext,
    context::AppContext,
    db::video::VideoRecord,
    error::{ApiError, ApiResult},
    media_type, metrics,
    thumbnail_store::{ThumbnailRef, UploadedBlob},
};
use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::{header, StatusCode},
    response::Response,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

/// Form field that carries the image payload
const THUMBNAIL_FIELD: &str = "thumbnail";

/// Headroom on top of the payload budget for multipart framing
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Build thumbnail routes
pub fn routes(upload_limit: usize) -> Router<AppContext> {
    Router::new().route(
        "/videos/:video_id/thumbnail",
        get(get_thumbnail)
            .post(upload_thumbnail)
            .put(upload_thumbnail)
            .layer(DefaultBodyLimit::max(upload_limit + MULTIPART_OVERHEAD)),
    )
}

fn parse_video_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest(format!("Invalid video ID: {}", raw)))
}

/// Upload a thumbnail for a video.
///
/// Linear pipeline, fail-fast, no rollback: authenticate, authorize
/// ownership, validate the declared media type, store the blob, update the
/// video record. A blob stored before a failing record update is left
/// orphaned.
async fn upload_thumbnail(
    State(ctx): State<AppContext>,
    auth: AuthContext,
    Path(video_id): Path<String>,
    mut multipart: Multipart,
) -> ApiResult<Json<VideoRecord>> {
    let video_id = parse_video_id(&video_id)?;

    tracing::info!(
        "uploading thumbnail for video {} by user {}",
        video_id,
        auth.user_id
    );

    let video = ctx
        .videos
        .get_video(video_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Unable to find video with ID {}", video_id)))?;

    // Authenticated is not authorized: only the owner may replace the thumbnail
    if video.user_id != auth.user_id {
        metrics::record_upload("forbidden");
        return Err(ApiError::Forbidden(format!(
            "User {} does not own video {}",
            auth.user_id, video_id
        )));
    }

    let policy = ctx.config.storage.media_type_policy;
    let mut upload: Option<UploadedBlob> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError::BadRequest(format!("Unable to parse thumbnail request: {}", e))
    })? {
        if field.name() != Some(THUMBNAIL_FIELD) {
            continue;
        }

        // The declared media type is checked before any payload bytes are read
        let media_type = media_type::validate(field.content_type(), policy).map_err(|e| {
            metrics::record_upload("invalid_media_type");
            e
        })?;

        let data = field.bytes().await.map_err(|e| {
            ApiError::BadRequest(format!("Unable to read thumbnail payload: {}", e))
        })?;

        upload = Some(UploadedBlob {
            data: data.to_vec(),
            media_type,
        });
        break;
    }

    let blob = upload.ok_or_else(|| {
        ApiError::BadRequest(format!(
            "Multipart body is missing a {} field",
            THUMBNAIL_FIELD
        ))
    })?;
    let blob_size = blob.data.len();

    let reference = ctx.thumbnails.store(blob, video_id).await?;

    let updated = ctx
        .videos
        .update_thumbnail(video_id, &reference.to_string())
        .await
        .map_err(|e| {
            // The blob is already persisted; a failed record update leaves it orphaned
            tracing::error!(
                "thumbnail stored but record update failed for video {}: {}",
                video_id,
                e
            );
            e
        })?;

    metrics::record_upload("ok");
    metrics::record_bytes_stored(blob_size);

    Ok(Json(updated))
}

/// Serve a stored thumbnail with its media type and exact length
async fn get_thumbnail(
    State(ctx): State<AppContext>,
    Path(video_id): Path<String>,
) -> ApiResult<Response> {
    let video_id = parse_video_id(&video_id)?;

    let video = ctx
        .videos
        .get_video(video_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Unable to find video with ID {}", video_id)))?;

    let raw = video.thumbnail_url.ok_or_else(|| {
        metrics::record_serve("missing");
        ApiError::NotFound(format!("Video {} does not have a thumbnail", video_id))
    })?;

    let reference = ThumbnailRef::parse(&raw)?;
    let (data, content_type) = ctx.thumbnails.resolve(&reference).await?;

    metrics::record_serve("ok");

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, data.len().to_string())
        .body(axum::body::Body::from(data))
        .unwrap())
}
