//! HS256 identity tokens.
//!
//! The subject is the NGO id rendered as a decimal string.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AuthError;
use crate::config::AppConfig;

/// Claims carried by every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

impl Claims {
    /// The NGO id named by the subject; anything but a positive integer is rejected.
    pub fn ngo_id(&self) -> Result<i32, AuthError> {
        match self.sub.parse::<i32>() {
            Ok(id) if id > 0 => Ok(id),
            _ => Err(AuthError::InvalidSubject),
        }
    }
}

/// Issue a signed access token for `ngo_id`.
pub fn issue_token(config: &AppConfig, ngo_id: i32) -> Result<String, AuthError> {
    let now = chrono::Utc::now().timestamp();
    let expiry = i64::try_from(config.jwt_expiry_seconds).unwrap_or(i64::MAX - now);

    let claims = Claims {
        sub: ngo_id.to_string(),
        iat: now,
        exp: now.saturating_add(expiry),
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_signing_secret().as_bytes()),
    )
    .map_err(AuthError::Encoding)
}

/// Verify signature and expiry, returning the decoded claims.
pub fn validate_token(config: &AppConfig, token: &str) -> Result<Claims, AuthError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_signing_secret().as_bytes()),
        &Validation::default(),
    )
    .map_err(AuthError::InvalidToken)?;

    Ok(data.claims)
}
