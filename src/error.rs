/// Unified error types for the clipshelf thumbnail service
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed identifier, malformed multipart body, or missing form field
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Missing or invalid bearer credential
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Authenticated caller does not own the target resource
    #[error("Not authorized: {0}")]
    Forbidden(String),

    /// Video or thumbnail absent
    #[error("Not found: {0}")]
    NotFound(String),

    /// Declared content type fails the configured allow-list
    #[error("Unsupported media type: {0}")]
    InvalidMediaType(String),

    /// I/O failure writing or reading a stored blob
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Stored thumbnail reference cannot be parsed back into a media type
    #[error("Corrupt thumbnail reference: {0}")]
    CorruptReference(String),

    /// Metadata store write failure after the blob was stored
    #[error("Update failed: {0}")]
    UpdateFailed(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status code this error maps to
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::InvalidMediaType(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::StorageUnavailable(_)
            | ApiError::CorruptReference(_)
            | ApiError::UpdateFailed(_)
            | ApiError::Database(_)
            | ApiError::Io(_)
            | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Uniform error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Convert ApiError to an HTTP response
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match &self {
            // Don't leak database/IO details to clients
            ApiError::Database(_) | ApiError::Io(_) | ApiError::Internal(_) => {
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        };

        if status.is_server_error() {
            tracing::error!("request failed: {}", self);
        } else {
            tracing::warn!("request rejected: {}", self);
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Result type alias for service operations
pub type ApiResult<T> = Result<T, ApiError>;
