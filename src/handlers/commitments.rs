//! # Commitment Handlers

use axum::{
    extract::{Path, State, rejection::PathRejection},
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::AuthNgo;
use crate::coverage::CoverageWorkflow;
use crate::error::ApiError;
use crate::models::{CommitmentStatus, compromiso};
use crate::repositories::CompromisoDetail;
use crate::server::AppState;

/// A commitment toward a collaboration request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CommitmentResponse {
    pub id: i32,
    pub request_id: i32,
    /// Committing NGO
    pub ong_id: i32,
    pub details: Option<String>,
    pub amount_committed: f64,
    pub status: CommitmentStatus,
}

impl From<compromiso::Model> for CommitmentResponse {
    fn from(model: compromiso::Model) -> Self {
        Self {
            id: model.id,
            request_id: model.pedido_id,
            ong_id: model.ong_id,
            details: model.details,
            amount_committed: model.amount_committed,
            status: model.status,
        }
    }
}

/// A project commitment with the request it targets
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProjectCommitmentResponse {
    #[serde(flatten)]
    pub commitment: CommitmentResponse,
    pub request_type: String,
    /// Name of the committing NGO
    pub ong_name: Option<String>,
}

impl From<CompromisoDetail> for ProjectCommitmentResponse {
    fn from(detail: CompromisoDetail) -> Self {
        Self {
            commitment: detail.compromiso.into(),
            request_type: detail.pedido.request_type,
            ong_name: detail.ong.map(|ong| ong.name),
        }
    }
}

/// Mark a commitment fulfilled (project owner only)
#[utoipa::path(
    patch,
    path = "/api/commitments/{commitment_id}/fulfill",
    security(("bearer_auth" = [])),
    params(("commitment_id" = i32, Path, description = "Commitment id")),
    responses(
        (status = 200, description = "Commitment fulfilled", body = CommitmentResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 403, description = "Caller does not own the project", body = ApiError),
        (status = 404, description = "Commitment not found", body = ApiError)
    ),
    tag = "commitments"
)]
pub async fn fulfill_commitment(
    State(state): State<AppState>,
    caller: AuthNgo,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<CommitmentResponse>, ApiError> {
    let Path(commitment_id) = path?;

    let compromiso = CoverageWorkflow::new(&state.db)
        .fulfill(caller.ngo_id, commitment_id)
        .await?;

    tracing::info!(
        ngo_id = caller.ngo_id,
        commitment_id,
        "Commitment fulfilled"
    );

    Ok(Json(compromiso.into()))
}

/// List all commitments across a project's requests (project owner only)
#[utoipa::path(
    get,
    path = "/api/projects/{project_id}/commitments",
    security(("bearer_auth" = [])),
    params(("project_id" = i32, Path, description = "Project id")),
    responses(
        (status = 200, description = "Project commitments", body = Vec<ProjectCommitmentResponse>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 403, description = "Caller does not own the project", body = ApiError),
        (status = 404, description = "Project not found", body = ApiError)
    ),
    tag = "commitments"
)]
pub async fn list_project_commitments(
    State(state): State<AppState>,
    caller: AuthNgo,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<Vec<ProjectCommitmentResponse>>, ApiError> {
    let Path(project_id) = path?;

    let details = CoverageWorkflow::new(&state.db)
        .project_commitments(caller.ngo_id, project_id)
        .await?;

    Ok(Json(details.into_iter().map(Into::into).collect()))
}
