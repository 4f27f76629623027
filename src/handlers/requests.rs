//! # Collaboration Request Handlers

use axum::{
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::commitments::CommitmentResponse;
use super::{RequiredFields, ensure_amount};
use crate::auth::AuthNgo;
use crate::coverage::{CoverageWorkflow, Pledge, RequestDraft};
use crate::error::ApiError;
use crate::models::{RequestStatus, pedido_colaboracion};
use crate::repositories::OpenPedido;
use crate::server::AppState;

/// A collaboration request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RequestResponse {
    pub id: i32,
    /// Kind of help asked for
    #[schema(example = "materiales")]
    pub request_type: String,
    pub description: String,
    pub amount_requested: f64,
    pub status: RequestStatus,
    pub coverage_plan_id: i32,
}

impl From<pedido_colaboracion::Model> for RequestResponse {
    fn from(model: pedido_colaboracion::Model) -> Self {
        Self {
            id: model.id,
            request_type: model.request_type,
            description: model.description,
            amount_requested: model.amount_requested,
            status: model.status,
            coverage_plan_id: model.coverage_plan_id,
        }
    }
}

/// An open request with the project it belongs to
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OpenRequestResponse {
    #[serde(flatten)]
    pub request: RequestResponse,
    pub project_id: i32,
    pub project_name: String,
    pub project_country: String,
    /// Name of the NGO owning the project
    pub ong_name: String,
}

impl From<OpenPedido> for OpenRequestResponse {
    fn from(row: OpenPedido) -> Self {
        Self {
            request: row.pedido.into(),
            project_id: row.project.id,
            project_name: row.project.project_name,
            project_country: row.project.country,
            ong_name: row.project.ong_name,
        }
    }
}

/// Body for adding a request to a project
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateRequestBody {
    #[serde(alias = "type")]
    #[schema(example = "materiales")]
    pub request_type: Option<String>,
    #[schema(example = "100 bolsas de cemento")]
    pub description: Option<String>,
    #[serde(alias = "amount_requested")]
    #[schema(example = 100.0)]
    pub amount: Option<f64>,
}

/// Body for committing to a request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct CommitBody {
    #[schema(example = "Podemos cubrir 50 bolsas")]
    pub details: Option<String>,
    #[serde(alias = "amount_committed")]
    #[schema(example = 50.0)]
    pub amount: Option<f64>,
}

/// List every open collaboration request
#[utoipa::path(
    get,
    path = "/api/requests",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Open requests", body = Vec<OpenRequestResponse>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError)
    ),
    tag = "requests"
)]
pub async fn list_open_requests(
    State(state): State<AppState>,
    _caller: AuthNgo,
) -> Result<Json<Vec<OpenRequestResponse>>, ApiError> {
    let rows = CoverageWorkflow::new(&state.db).open_requests().await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// Commit to another NGO's open request
#[utoipa::path(
    post,
    path = "/api/requests/{request_id}/commit",
    security(("bearer_auth" = [])),
    params(("request_id" = i32, Path, description = "Collaboration request id")),
    request_body = CommitBody,
    responses(
        (status = 201, description = "Commitment recorded", body = CommitmentResponse),
        (status = 400, description = "Details or amount missing", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 403, description = "Caller owns the project", body = ApiError),
        (status = 404, description = "Request missing or not open", body = ApiError)
    ),
    tag = "requests"
)]
pub async fn commit_to_request(
    State(state): State<AppState>,
    caller: AuthNgo,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<CommitBody>, JsonRejection>,
) -> Result<(StatusCode, Json<CommitmentResponse>), ApiError> {
    let Path(request_id) = path?;
    let Json(body) = payload?;

    let mut required = RequiredFields::default();
    let details = required.text("details", body.details);
    let amount = required.value("amount", body.amount);
    required.finish()?;
    let amount = ensure_amount("amount", amount)?;

    let compromiso = CoverageWorkflow::new(&state.db)
        .commit(
            caller.ngo_id,
            request_id,
            Pledge {
                details: Some(details),
                amount,
            },
        )
        .await?;

    tracing::info!(
        ngo_id = caller.ngo_id,
        request_id,
        commitment_id = compromiso.id,
        "Commitment created"
    );

    Ok((StatusCode::CREATED, Json(compromiso.into())))
}

/// List every request of a project, whatever its status
#[utoipa::path(
    get,
    path = "/api/projects/{project_id}/requests",
    security(("bearer_auth" = [])),
    params(("project_id" = i32, Path, description = "Project id")),
    responses(
        (status = 200, description = "Project requests", body = Vec<RequestResponse>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Project not found", body = ApiError)
    ),
    tag = "requests"
)]
pub async fn list_project_requests(
    State(state): State<AppState>,
    _caller: AuthNgo,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<Vec<RequestResponse>>, ApiError> {
    let Path(project_id) = path?;
    let pedidos = CoverageWorkflow::new(&state.db)
        .project_requests(project_id)
        .await?;
    Ok(Json(pedidos.into_iter().map(Into::into).collect()))
}

/// Add an open request to one of the caller's projects
#[utoipa::path(
    post,
    path = "/api/projects/{project_id}/requests",
    security(("bearer_auth" = [])),
    params(("project_id" = i32, Path, description = "Project id")),
    request_body = CreateRequestBody,
    responses(
        (status = 201, description = "Request created", body = RequestResponse),
        (status = 400, description = "Type, description or amount missing", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 403, description = "Caller does not own the project", body = ApiError),
        (status = 404, description = "Project or coverage plan not found", body = ApiError)
    ),
    tag = "requests"
)]
pub async fn create_project_request(
    State(state): State<AppState>,
    caller: AuthNgo,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<CreateRequestBody>, JsonRejection>,
) -> Result<(StatusCode, Json<RequestResponse>), ApiError> {
    let Path(project_id) = path?;
    let Json(body) = payload?;

    let mut required = RequiredFields::default();
    let request_type = required.text("request_type", body.request_type);
    let description = required.text("description", body.description);
    let amount = required.value("amount", body.amount);
    required.finish()?;
    let amount = ensure_amount("amount", amount)?;

    let pedido = CoverageWorkflow::new(&state.db)
        .add_request(
            caller.ngo_id,
            project_id,
            RequestDraft {
                request_type,
                description,
                amount,
            },
        )
        .await?;

    tracing::info!(
        ngo_id = caller.ngo_id,
        project_id,
        request_id = pedido.id,
        "Collaboration request created"
    );

    Ok((StatusCode::CREATED, Json(pedido.into())))
}
