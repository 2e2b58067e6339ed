/// Media type classification for thumbnail uploads
///
/// Pure classification, no I/O. The declared content type is checked before
/// any payload bytes are read.
use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Allow-list policy for uploaded thumbnails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaTypePolicy {
    /// Only `image/jpeg` and `image/png`
    Strict,
    /// Any `image/*` subtype
    Permissive,
}

/// A parsed `top/subtype` media type, lowercased, parameters stripped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaType {
    pub top: String,
    pub subtype: String,
}

fn is_token(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

impl MediaType {
    /// Parse a declared content type, ignoring any parameters
    /// (`image/png; charset=x` parses as `image/png`)
    pub fn parse(raw: &str) -> ApiResult<Self> {
        let essence = raw.split(';').next().unwrap_or("").trim();

        let (top, subtype) = essence.split_once('/').ok_or_else(|| {
            ApiError::InvalidMediaType(format!("malformed media type: {}", raw))
        })?;

        if !is_token(top) || !is_token(subtype) {
            return Err(ApiError::InvalidMediaType(format!(
                "malformed media type: {}",
                raw
            )));
        }

        Ok(Self {
            top: top.to_ascii_lowercase(),
            subtype: subtype.to_ascii_lowercase(),
        })
    }

    /// File-name extension implied by this media type (the lowercased subtype)
    pub fn extension(&self) -> &str {
        &self.subtype
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.top, self.subtype)
    }
}

/// Validate a declared content type against the configured allow-list.
///
/// A missing, malformed, or disallowed type fails with `InvalidMediaType`.
pub fn validate(declared: Option<&str>, policy: MediaTypePolicy) -> ApiResult<MediaType> {
    let raw = declared.ok_or_else(|| {
        ApiError::InvalidMediaType("thumbnail is missing a media type".to_string())
    })?;

    let media_type = MediaType::parse(raw)?;

    let allowed = match policy {
        MediaTypePolicy::Strict => {
            media_type.top == "image"
                && matches!(media_type.subtype.as_str(), "jpeg" | "png")
        }
        MediaTypePolicy::Permissive => media_type.top == "image",
    };

    if !allowed {
        return Err(ApiError::InvalidMediaType(format!(
            "media type {} is not an allowed thumbnail format",
            media_type
        )));
    }

    Ok(media_type)
}
