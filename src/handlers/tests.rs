//! # Tests for Handlers

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::Json,
};
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tower::ServiceExt;

use crate::config::AppConfig;
use crate::handlers::{RequiredFields, ensure_amount, healthz, readyz, root};
use crate::server::{AppState, create_app};

fn disconnected_state() -> AppState {
    AppState {
        config: Arc::new(AppConfig::default()),
        db: DatabaseConnection::default(),
    }
}

#[tokio::test]
async fn test_root_handler_returns_expected_service_info() {
    let Json(service_info) = root().await;

    assert_eq!(service_info.service, "ngo-collab");
    assert_eq!(service_info.version, env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_healthz_is_always_ok() {
    let Json(status) = healthz().await;
    assert_eq!(status.status, "ok");
}

#[tokio::test]
async fn test_readyz_without_database_is_unavailable() {
    let error = readyz(State(disconnected_state())).await.unwrap_err();
    assert_eq!(error.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(error.code, Box::from("SERVICE_UNAVAILABLE"));
}

#[tokio::test]
async fn test_trace_id_header_is_echoed() {
    let app = create_app(disconnected_state());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header("X-Trace-Id", "trace-from-client")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-trace-id").unwrap(),
        "trace-from-client"
    );
}

#[tokio::test]
async fn test_error_body_carries_request_trace_id() {
    let app = create_app(disconnected_state());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/projects")
                .header("X-Trace-Id", "trace-401")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["trace_id"], "trace-401");
}

#[tokio::test]
async fn test_generated_trace_id_when_header_absent() {
    let app = create_app(disconnected_state());

    let response = app
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let trace_id = response.headers().get("x-trace-id").unwrap();
    assert!(uuid::Uuid::parse_str(trace_id.to_str().unwrap()).is_ok());
}

#[test]
fn test_required_fields_collects_blank_and_absent() {
    let mut required = RequiredFields::default();
    let name = required.text("name", Some("  ONG  ".to_string()));
    let password = required.secret("password", Some("   ".to_string()));
    let amount: f64 = required.value("amount", None);
    let stages: Vec<String> = required.list("stages", Some(Vec::new()));

    assert_eq!(name, "ONG");
    assert!(password.is_empty());
    assert_eq!(amount, 0.0);
    assert!(stages.is_empty());

    let error = required.finish().unwrap_err();
    assert_eq!(
        error.details.as_deref(),
        Some(&serde_json::json!({ "missing": ["password", "amount", "stages"] }))
    );
}

#[test]
fn test_secret_is_not_trimmed() {
    let mut required = RequiredFields::default();
    let password = required.secret("password", Some(" pass ".to_string()));
    assert_eq!(password, " pass ");
    assert!(required.finish().is_ok());
}

#[test]
fn test_ensure_amount_rejects_negative_and_nan() {
    assert_eq!(ensure_amount("amount", 12.5).unwrap(), 12.5);
    assert!(ensure_amount("amount", -1.0).is_err());
    assert!(ensure_amount("amount", f64::NAN).is_err());
}
