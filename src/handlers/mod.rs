//! # API Handlers
//!
//! HTTP endpoints for the NGO collaboration API. `/auth/*` handlers are open;
//! every `/api/*` handler takes an [`AuthNgo`](crate::auth::AuthNgo).

pub mod auth;
pub mod commitments;
pub mod projects;
pub mod requests;

use axum::{extract::State, http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db;
use crate::error::{ApiError, missing_fields, validation_error};
use crate::models::ServiceInfo;
use crate::server::AppState;

/// Root handler that returns basic service information
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service information", body = ServiceInfo)
    ),
    tag = "root"
)]
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo::default())
}

/// Health/readiness status body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    #[schema(example = "ok")]
    pub status: String,
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/healthz",
    responses(
        (status = 200, description = "Service is alive", body = HealthStatus)
    ),
    tag = "health"
)]
pub async fn healthz() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
    })
}

/// Readiness probe; checks the database answers
#[utoipa::path(
    get,
    path = "/readyz",
    responses(
        (status = 200, description = "Service is ready", body = HealthStatus),
        (status = 503, description = "Database unavailable", body = ApiError)
    ),
    tag = "health"
)]
pub async fn readyz(State(state): State<AppState>) -> Result<Json<HealthStatus>, ApiError> {
    db::health_check(&state.db).await.map_err(|err| {
        tracing::warn!(error = %err, "Readiness check failed");
        ApiError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "SERVICE_UNAVAILABLE",
            "Database service unavailable",
        )
    })?;

    Ok(Json(HealthStatus {
        status: "ready".to_string(),
    }))
}

/// Collects the names of absent or blank body fields so a single 400 can list them all.
#[derive(Debug, Default)]
pub(crate) struct RequiredFields {
    missing: Vec<&'static str>,
}

impl RequiredFields {
    /// A non-blank string, trimmed.
    pub(crate) fn text(&mut self, name: &'static str, value: Option<String>) -> String {
        match value {
            Some(value) if !value.trim().is_empty() => value.trim().to_string(),
            _ => {
                self.missing.push(name);
                String::new()
            }
        }
    }

    /// A non-blank string, returned as sent.
    pub(crate) fn secret(&mut self, name: &'static str, value: Option<String>) -> String {
        match value {
            Some(value) if !value.trim().is_empty() => value,
            _ => {
                self.missing.push(name);
                String::new()
            }
        }
    }

    pub(crate) fn value<T: Default>(&mut self, name: &'static str, value: Option<T>) -> T {
        value.unwrap_or_else(|| {
            self.missing.push(name);
            T::default()
        })
    }

    pub(crate) fn list<T>(&mut self, name: &'static str, value: Option<Vec<T>>) -> Vec<T> {
        match value {
            Some(items) if !items.is_empty() => items,
            _ => {
                self.missing.push(name);
                Vec::new()
            }
        }
    }

    pub(crate) fn finish(self) -> Result<(), ApiError> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(missing_fields(&self.missing))
        }
    }
}

/// Reject negative or non-finite amounts.
pub(crate) fn ensure_amount(field: &'static str, value: f64) -> Result<f64, ApiError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(validation_error(
            "Invalid amount",
            serde_json::json!({ field: "must be a non-negative number" }),
        ))
    }
}

#[cfg(test)]
mod tests;
