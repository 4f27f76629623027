//! Test utilities for driving the API over an in-memory SQLite database.

#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use migration::{Migrator, MigratorTrait};
use ngo_collab::{
    config::AppConfig,
    server::{AppState, create_app},
};
use sea_orm::{Database, DatabaseConnection};
use serde_json::{Value, json};
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Sets up an in-memory SQLite database with all migrations applied.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

pub fn test_config() -> Arc<AppConfig> {
    Arc::new(AppConfig {
        profile: "test".to_string(),
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: Some(TEST_JWT_SECRET.to_string()),
        ..Default::default()
    })
}

/// The real router over `db`.
pub fn build_app(db: DatabaseConnection) -> Router {
    create_app(AppState {
        config: test_config(),
        db,
    })
}

/// Fresh database plus router sharing it.
pub async fn setup_app() -> Result<(Router, DatabaseConnection)> {
    let db = setup_test_db().await?;
    Ok((build_app(db.clone()), db))
}

/// Send one request and decode the JSON body (`Value::Null` when empty).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

pub async fn register(app: &Router, name: &str, password: &str) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({ "name": name, "password": password })),
    )
    .await
}

pub async fn login(app: &Router, name: &str, password: &str) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "name": name, "password": password })),
    )
    .await
}

/// Register an NGO and return its id and a bearer token.
pub async fn register_and_login(app: &Router, name: &str, password: &str) -> (i64, String) {
    let (status, body) = register(app, name, password).await;
    assert_eq!(status, StatusCode::CREATED, "register {name}: {body}");
    let id = body["id"].as_i64().unwrap();

    let (status, body) = login(app, name, password).await;
    assert_eq!(status, StatusCode::OK, "login {name}: {body}");
    let token = body["access_token"].as_str().unwrap().to_string();

    (id, token)
}

/// A body carrying every required project field.
pub fn project_body(name: &str) -> Value {
    json!({
        "name": name,
        "description": "Instalación de sistema de purificación",
        "country": "Argentina",
        "location": "Buenos Aires",
        "project_types": ["Agua", "Infraestructura"],
        "budget": 50000.0,
        "duration": 6,
        "objectives": "Agua limpia para 100 familias",
        "beneficiaries": "300 personas",
        "stages": [
            { "name": "Relevamiento", "start": "2025-11-01", "end": "2025-11-15" }
        ],
        "strategy": "Donaciones de materiales",
        "organizations": ["Cáritas"]
    })
}

/// Create a project as `token` and return its id.
pub async fn create_project(app: &Router, token: &str, name: &str) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/projects",
        Some(token),
        Some(project_body(name)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create project: {body}");
    body["id"].as_i64().unwrap()
}

/// Add a request to a project and return its id.
pub async fn create_request(
    app: &Router,
    token: &str,
    project_id: i64,
    request_type: &str,
    amount: f64,
) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        &format!("/api/projects/{}/requests", project_id),
        Some(token),
        Some(json!({
            "type": request_type,
            "description": format!("Pedido de {}", request_type),
            "amount": amount
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create request: {body}");
    body["id"].as_i64().unwrap()
}

/// Commit to a request and return the commitment id.
pub async fn commit(app: &Router, token: &str, request_id: i64, amount: f64) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        &format!("/api/requests/{}/commit", request_id),
        Some(token),
        Some(json!({ "details": "Podemos ayudar", "amount": amount })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "commit: {body}");
    body["id"].as_i64().unwrap()
}
