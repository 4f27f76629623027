//! # Server Configuration
//!
//! Router assembly, shared state, OpenAPI document and the serve loop.

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};
use sea_orm::DatabaseConnection;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppConfig;
use crate::handlers;
use crate::telemetry;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: DatabaseConnection,
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/requests", get(handlers::requests::list_open_requests))
        .route(
            "/requests/{request_id}/commit",
            post(handlers::requests::commit_to_request),
        )
        .route(
            "/commitments/{commitment_id}/fulfill",
            patch(handlers::commitments::fulfill_commitment),
        )
        .route(
            "/projects",
            get(handlers::projects::list_projects).post(handlers::projects::create_project),
        )
        .route(
            "/projects/{project_id}/requests",
            get(handlers::requests::list_project_requests)
                .post(handlers::requests::create_project_request),
        )
        .route(
            "/projects/{project_id}/commitments",
            get(handlers::commitments::list_project_commitments),
        )
}

/// Creates and configures the Axum application router
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/healthz", get(handlers::healthz))
        .route("/readyz", get(handlers::readyz))
        .nest("/auth", auth_routes())
        .nest("/api", api_routes())
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(telemetry::trace_id_middleware))
}

/// Starts the server with the given configuration
pub async fn run_server(
    config: AppConfig,
    db: DatabaseConnection,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config
        .bind_addr()
        .map_err(|e| format!("Invalid server address: {}", e))?;

    let profile = config.profile.clone();
    let state = AppState {
        config: Arc::new(config),
        db,
    };
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, %profile, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Registers the bearer token scheme referenced by `/api` operations.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::healthz,
        crate::handlers::readyz,
        crate::handlers::auth::register,
        crate::handlers::auth::login,
        crate::handlers::requests::list_open_requests,
        crate::handlers::requests::commit_to_request,
        crate::handlers::requests::list_project_requests,
        crate::handlers::requests::create_project_request,
        crate::handlers::commitments::fulfill_commitment,
        crate::handlers::commitments::list_project_commitments,
        crate::handlers::projects::list_projects,
        crate::handlers::projects::create_project,
    ),
    components(
        schemas(
            crate::models::ServiceInfo,
            crate::models::Stage,
            crate::models::RequestStatus,
            crate::models::CommitmentStatus,
            crate::error::ApiError,
            crate::handlers::HealthStatus,
            crate::handlers::auth::CredentialsRequest,
            crate::handlers::auth::RegisterResponse,
            crate::handlers::auth::LoginResponse,
            crate::handlers::projects::CreateProjectRequest,
            crate::handlers::projects::ProjectResponse,
            crate::handlers::projects::WorkPlanResponse,
            crate::handlers::projects::CoveragePlanResponse,
            crate::handlers::requests::RequestResponse,
            crate::handlers::requests::OpenRequestResponse,
            crate::handlers::requests::CreateRequestBody,
            crate::handlers::requests::CommitBody,
            crate::handlers::commitments::CommitmentResponse,
            crate::handlers::commitments::ProjectCommitmentResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "NGO registration and login"),
        (name = "projects", description = "Project catalog"),
        (name = "requests", description = "Collaboration requests"),
        (name = "commitments", description = "Commitments toward requests"),
    ),
    info(
        title = "NGO Collaboration API",
        description = "Projects, collaboration requests and commitments between NGOs",
        version = env!("CARGO_PKG_VERSION"),
    )
)]
pub struct ApiDoc;
