/// Authentication: access token minting, verification, and the request extractor
use crate::{
    api::middleware::extract_bearer_token,
    context::AppContext,
    error::{ApiError, ApiResult},
};
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims carried by an access token
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's ID
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Mint an access token for a user
pub fn create_access_token(user_id: Uuid, jwt_secret: &str, ttl_seconds: i64) -> ApiResult<String> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now,
        exp: now + ttl_seconds,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(format!("Failed to generate token: {}", e)))
}

/// Verify a bearer token and return the authenticated user ID.
///
/// This performs:
/// 1. JWT signature verification
/// 2. Expiration checking
/// 3. Subject claim validation
pub fn verify_access_token(token: &str, jwt_secret: &str) -> ApiResult<Uuid> {
    let decoding_key = DecodingKey::from_secret(jwt_secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    // Allow some clock skew (5 minutes)
    validation.leeway = 300;

    let token_data = decode::<Claims>(token, &decoding_key, &validation).map_err(|e| {
        tracing::warn!("JWT verification failed: {}", e);
        match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                ApiError::Unauthorized("Token has expired".to_string())
            }
            jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                ApiError::Unauthorized("Invalid token signature".to_string())
            }
            _ => ApiError::Unauthorized(format!("Invalid token: {}", e)),
        }
    })?;

    Uuid::parse_str(&token_data.claims.sub)
        .map_err(|_| ApiError::Unauthorized("Invalid token subject".to_string()))
}

/// Authenticated context - extracts and verifies the bearer JWT from a request
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: Uuid,
}

#[async_trait]
impl FromRequestParts<AppContext> for AuthContext {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers)
            .ok_or_else(|| ApiError::Unauthorized("Missing authorization header".to_string()))?;

        let user_id = verify_access_token(&token, &state.config.authentication.jwt_secret)?;

        Ok(AuthContext { user_id })
    }
}
