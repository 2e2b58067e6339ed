/// Thumbnail reference models and wire formats
use crate::error::{ApiError, ApiResult};
use crate::media_type::MediaType;
use std::fmt;

/// Raw image payload received from a client, scoped to a single request.
/// Consumed by the store; never retained.
#[derive(Debug, Clone)]
pub struct UploadedBlob {
    pub data: Vec<u8>,
    pub media_type: MediaType,
}

const DATA_URL_SCHEME: &str = "data:";
const DATA_URL_SEPARATOR: &str = ";base64,";

/// Inline `data:<mediaType>;base64,<payload>` URL.
///
/// Structured parser/serializer pair instead of pattern extraction at read
/// time; the media type travels inside the reference itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub media_type: String,
    pub payload: String,
}

impl DataUrl {
    pub fn parse(raw: &str) -> ApiResult<Self> {
        let rest = raw.strip_prefix(DATA_URL_SCHEME).ok_or_else(|| {
            ApiError::CorruptReference("reference is not a data URL".to_string())
        })?;

        let (media_type, payload) = rest.split_once(DATA_URL_SEPARATOR).ok_or_else(|| {
            ApiError::CorruptReference(
                "data URL does not declare a base64 media type".to_string(),
            )
        })?;

        if media_type.is_empty() || !media_type.contains('/') {
            return Err(ApiError::CorruptReference(format!(
                "data URL does not have an encoded media type: {}",
                media_type
            )));
        }

        Ok(Self {
            media_type: media_type.to_string(),
            payload: payload.to_string(),
        })
    }
}

impl fmt::Display for DataUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            DATA_URL_SCHEME, self.media_type, DATA_URL_SEPARATOR, self.payload
        )
    }
}

/// Stored pointer to a thumbnail blob.
///
/// The tag decides the decode strategy on the read path. A reference is
/// constructed whole or not at all; there is no partially-built state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThumbnailRef {
    /// Self-contained data URL embedded in the video record
    Inline(DataUrl),
    /// Rooted URL path to a file under the served asset root
    File(String),
}

impl ThumbnailRef {
    /// Parse a stored reference string back into its tagged form
    pub fn parse(raw: &str) -> ApiResult<Self> {
        if raw.starts_with(DATA_URL_SCHEME) {
            Ok(ThumbnailRef::Inline(DataUrl::parse(raw)?))
        } else if raw.starts_with('/') {
            Ok(ThumbnailRef::File(raw.to_string()))
        } else {
            Err(ApiError::CorruptReference(format!(
                "unrecognized thumbnail reference: {}",
                raw
            )))
        }
    }
}

impl fmt::Display for ThumbnailRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThumbnailRef::Inline(data_url) => data_url.fmt(f),
            ThumbnailRef::File(path) => f.write_str(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url_round_trip() {
        let original = DataUrl {
            media_type: "image/png".to_string(),
            payload: "aGVsbG8=".to_string(),
        };

        let serialized = original.to_string();
        assert_eq!(serialized, "data:image/png;base64,aGVsbG8=");

        let parsed = DataUrl::parse(&serialized).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_data_url_rejects_missing_separator() {
        let err = DataUrl::parse("data:image/png,aGVsbG8=").unwrap_err();
        assert!(matches!(err, ApiError::CorruptReference(_)));
    }

    #[test]
    fn test_data_url_rejects_missing_media_type() {
        let err = DataUrl::parse("data:;base64,aGVsbG8=").unwrap_err();
        assert!(matches!(err, ApiError::CorruptReference(_)));

        let err = DataUrl::parse("data:png;base64,aGVsbG8=").unwrap_err();
        assert!(matches!(err, ApiError::CorruptReference(_)));
    }

    #[test]
    fn test_reference_round_trip() {
        let inline = ThumbnailRef::parse("data:image/jpeg;base64,Zm9v").unwrap();
        assert!(matches!(inline, ThumbnailRef::Inline(_)));
        assert_eq!(
            ThumbnailRef::parse(&inline.to_string()).unwrap(),
            inline
        );

        let file = ThumbnailRef::parse("/assets/abc.png").unwrap();
        assert_eq!(file, ThumbnailRef::File("/assets/abc.png".to_string()));
        assert_eq!(file.to_string(), "/assets/abc.png");
    }

    #[test]
    fn test_unrecognized_reference() {
        for raw in ["", "http://example.com/a.png", "abc.png", "date:image/png;base64,x"] {
            let err = ThumbnailRef::parse(raw).unwrap_err();
            assert!(matches!(err, ApiError::CorruptReference(_)), "{:?}", raw);
        }
    }
}
