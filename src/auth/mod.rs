//! # Authentication
//!
//! Password hashing, identity tokens and the [`AuthNgo`] extractor that turns a
//! bearer token into the calling NGO's id for every `/api` handler.

pub mod password;
pub mod token;

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
};
use thiserror::Error;

use crate::config::AppConfig;
use crate::error::{ApiError, unauthorized};
use crate::server::AppState;

pub use password::{hash_password, reject_unknown_account, verify_password};
pub use token::{Claims, issue_token, validate_token};

/// Failures raised while authenticating a caller.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing Authorization header")]
    MissingHeader,
    #[error("Authorization header must use the Bearer scheme")]
    InvalidScheme,
    #[error("invalid or expired token: {0}")]
    InvalidToken(jsonwebtoken::errors::Error),
    #[error("token subject is not an NGO id")]
    InvalidSubject,
    #[error("failed to sign token: {0}")]
    Encoding(jsonwebtoken::errors::Error),
    #[error("failed to hash password: {0}")]
    Hashing(argon2::password_hash::Error),
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::MissingHeader => unauthorized(Some("Missing Authorization header")),
            AuthError::InvalidScheme => {
                unauthorized(Some("Authorization header must use Bearer scheme"))
            }
            AuthError::InvalidToken(_) | AuthError::InvalidSubject => {
                tracing::debug!(error = %error, "Rejected bearer token");
                unauthorized(Some("Invalid or expired token"))
            }
            AuthError::Encoding(_) | AuthError::Hashing(_) => {
                tracing::error!(error = %error, "Credential processing failed");
                ApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_SERVER_ERROR",
                    "An internal error occurred",
                )
            }
        }
    }
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        Arc::clone(&app_state.config)
    }
}

/// Identity of the NGO making the request, resolved from its bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthNgo {
    pub ngo_id: i32,
}

fn bearer_token(parts: &Parts) -> Result<&str, AuthError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidScheme)?;

    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::InvalidScheme)
}

impl<S> FromRequestParts<S> for AuthNgo
where
    Arc<AppConfig>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = Arc::<AppConfig>::from_ref(state);
        let token = bearer_token(parts)?;
        let claims = validate_token(&config, token)?;
        let ngo_id = claims.ngo_id()?;

        Ok(AuthNgo { ngo_id })
    }
}
