//! # Auth Handlers
//!
//! NGO registration and login.

use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::RequiredFields;
use crate::auth::{
    AuthError, hash_password, issue_token, reject_unknown_account, verify_password,
};
use crate::error::{ApiError, conflict, unauthorized};
use crate::repositories::OngRepository;
use crate::server::AppState;

/// Credentials submitted to register or log in
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CredentialsRequest {
    /// NGO account name
    #[schema(example = "prueba_ong")]
    pub name: Option<String>,
    /// Plaintext password
    #[schema(example = "password123")]
    pub password: Option<String>,
}

/// Registration result
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    #[schema(example = "NGO created")]
    pub msg: String,
    /// Id of the new NGO
    pub id: i32,
}

/// Issued bearer token
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
}

fn credentials(body: CredentialsRequest) -> Result<(String, String), ApiError> {
    let mut required = RequiredFields::default();
    let name = required.text("name", body.name);
    let password = required.secret("password", body.password);
    required.finish()?;
    Ok((name, password))
}

/// Register a new NGO
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "NGO created", body = RegisterResponse),
        (status = 400, description = "Name or password missing", body = ApiError),
        (status = 409, description = "NGO name already exists", body = ApiError)
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let Json(body) = payload?;
    let (name, password) = credentials(body)?;

    let repo = OngRepository::new(&state.db);
    if repo.find_by_name(&name).await?.is_some() {
        tracing::warn!(ngo_name = %name, "Registration rejected: name taken");
        return Err(conflict("NGO name already exists"));
    }

    let password_hash = hash_password(&password).map_err(AuthError::Hashing)?;
    let ong = repo.create(&name, password_hash).await?;

    tracing::info!(ngo_id = ong.id, ngo_name = %ong.name, "NGO registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            msg: "NGO created".to_string(),
            id: ong.id,
        }),
    ))
}

/// Log in and receive a bearer token
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Login succeeded", body = LoginResponse),
        (status = 400, description = "Name or password missing", body = ApiError),
        (status = 401, description = "Unknown NGO or wrong password", body = ApiError)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(body) = payload?;
    let (name, password) = credentials(body)?;

    let ong = OngRepository::new(&state.db).find_by_name(&name).await?;
    let verified = match &ong {
        Some(ong) => verify_password(&password, &ong.password),
        None => reject_unknown_account(&password),
    };

    let Some(ong) = ong.filter(|_| verified) else {
        tracing::warn!(ngo_name = %name, "Login rejected");
        return Err(unauthorized(Some("Invalid NGO name or password")));
    };

    let access_token = issue_token(&state.config, ong.id)?;
    tracing::info!(ngo_id = ong.id, "NGO logged in");

    Ok(Json(LoginResponse { access_token }))
}
