/// Configuration management for clipshelf
use crate::error::{ApiError, ApiResult};
use crate::media_type::MediaTypePolicy;
use crate::thumbnail_store::StorageStrategy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Default byte ceiling for multipart thumbnail parsing (10 MiB)
pub const DEFAULT_UPLOAD_LIMIT: usize = 10 << 20;

/// Main server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub service: ServiceConfig,
    pub storage: StorageConfig,
    pub authentication: AuthConfig,
    pub logging: LoggingConfig,
}

/// Service-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub hostname: String,
    pub port: u16,
    /// Byte ceiling for a single thumbnail upload
    pub upload_limit: usize,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_directory: PathBuf,
    pub video_db: PathBuf,
    /// Directory for file-strategy blobs, served under /assets
    pub asset_root: PathBuf,
    pub strategy: StorageStrategy,
    pub media_type_policy: MediaTypePolicy,
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
    /// Access token lifetime in seconds
    pub token_ttl: i64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> ApiResult<Self> {
        dotenv::dotenv().ok();

        let hostname =
            env::var("CLIPSHELF_HOSTNAME").unwrap_or_else(|_| "localhost".to_string());
        let port = env::var("CLIPSHELF_PORT")
            .unwrap_or_else(|_| "8091".to_string())
            .parse()
            .map_err(|_| ApiError::BadRequest("Invalid port number".to_string()))?;

        let upload_limit = env::var("CLIPSHELF_UPLOAD_LIMIT")
            .unwrap_or_else(|_| DEFAULT_UPLOAD_LIMIT.to_string())
            .parse()
            .unwrap_or(DEFAULT_UPLOAD_LIMIT);

        let data_directory: PathBuf = env::var("CLIPSHELF_DATA_DIRECTORY")
            .unwrap_or_else(|_| "./data".to_string())
            .into();
        let video_db = env::var("CLIPSHELF_VIDEO_DB_LOCATION")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_directory.join("videos.sqlite"));
        let asset_root = env::var("CLIPSHELF_ASSET_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_directory.join("assets"));

        let strategy = match env::var("CLIPSHELF_STORAGE_STRATEGY")
            .unwrap_or_else(|_| "file".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "inline" => StorageStrategy::Inline,
            "file" => StorageStrategy::File,
            other => {
                return Err(ApiError::BadRequest(format!(
                    "Unknown storage strategy: {}",
                    other
                )))
            }
        };

        let media_type_policy = match env::var("CLIPSHELF_MEDIA_TYPE_POLICY")
            .unwrap_or_else(|_| "strict".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "strict" => MediaTypePolicy::Strict,
            "permissive" => MediaTypePolicy::Permissive,
            other => {
                return Err(ApiError::BadRequest(format!(
                    "Unknown media type policy: {}",
                    other
                )))
            }
        };

        let jwt_secret = env::var("CLIPSHELF_JWT_SECRET")
            .map_err(|_| ApiError::BadRequest("JWT secret required".to_string()))?;
        let token_ttl = env::var("CLIPSHELF_TOKEN_TTL")
            .unwrap_or_else(|_| "3600".to_string())
            .parse()
            .unwrap_or(3600);

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Ok(ServerConfig {
            service: ServiceConfig {
                hostname,
                port,
                upload_limit,
            },
            storage: StorageConfig {
                data_directory,
                video_db,
                asset_root,
                strategy,
                media_type_policy,
            },
            authentication: AuthConfig {
                jwt_secret,
                token_ttl,
            },
            logging: LoggingConfig { level: log_level },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> ApiResult<()> {
        if self.service.hostname.is_empty() {
            return Err(ApiError::BadRequest("Hostname cannot be empty".to_string()));
        }

        if self.authentication.jwt_secret.len() < 32 {
            return Err(ApiError::BadRequest(
                "JWT secret must be at least 32 characters".to_string(),
            ));
        }

        if self.service.upload_limit == 0 {
            return Err(ApiError::BadRequest(
                "Upload limit must be non-zero".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ServerConfig {
        ServerConfig {
            service: ServiceConfig {
                hostname: "localhost".to_string(),
                port: 8091,
                upload_limit: DEFAULT_UPLOAD_LIMIT,
            },
            storage: StorageConfig {
                data_directory: "./data".into(),
                video_db: "./data/videos.sqlite".into(),
                asset_root: "./data/assets".into(),
                strategy: StorageStrategy::File,
                media_type_policy: MediaTypePolicy::Strict,
            },
            authentication: AuthConfig {
                jwt_secret: "0123456789abcdef0123456789abcdef".to_string(),
                token_ttl: 3600,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }

    #[test]
    fn test_valid_config() {
        test_config().validate().unwrap();
    }

    #[test]
    fn test_short_jwt_secret_rejected() {
        let mut config = test_config();
        config.authentication.jwt_secret = "short".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_upload_limit_rejected() {
        let mut config = test_config();
        config.service.upload_limit = 0;
        assert!(config.validate().is_err());
    }
}
