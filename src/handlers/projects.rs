//! # Project Handlers
//!
//! Project catalog endpoints. A project is always created together with its
//! work plan and coverage plan.

use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{RequiredFields, ensure_amount};
use crate::auth::AuthNgo;
use crate::error::{ApiError, not_found, validation_error};
use crate::models::{Stage, coverage_plan, project_definition, work_plan};
use crate::repositories::{NewProject, OngRepository, ProjectRepository, ProjectWithPlans};
use crate::server::AppState;

/// Body of a project creation request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateProjectRequest {
    #[schema(example = "Proyecto de Agua Potable")]
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(example = "Argentina")]
    pub country: Option<String>,
    pub location: Option<String>,
    /// Category tags
    pub project_types: Option<Vec<String>>,
    #[schema(example = 50000.0)]
    pub budget: Option<f64>,
    /// Duration in months
    #[schema(example = 6)]
    pub duration: Option<i32>,
    pub objectives: Option<String>,
    pub beneficiaries: Option<String>,
    /// Ordered work plan stages; at least one
    pub stages: Option<Vec<Stage>>,
    pub monitoring_plan: Option<String>,
    pub risk_analysis: Option<String>,
    pub success_indicators: Option<String>,
    pub terms_accepted: Option<bool>,
    /// Coverage strategy
    pub strategy: Option<String>,
    /// Partner organization names
    pub organizations: Option<Vec<String>>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WorkPlanResponse {
    pub id: i32,
    pub project_id: i32,
    pub stages: Vec<Stage>,
    pub monitoring_plan: Option<String>,
    pub risk_analysis: Option<String>,
    pub success_indicators: Option<String>,
    pub terms_accepted: bool,
    pub created_at: String,
}

impl From<work_plan::Model> for WorkPlanResponse {
    fn from(model: work_plan::Model) -> Self {
        Self {
            id: model.id,
            project_id: model.project_id,
            stages: model.stages.0,
            monitoring_plan: model.monitoring_plan,
            risk_analysis: model.risk_analysis,
            success_indicators: model.success_indicators,
            terms_accepted: model.terms_accepted,
            created_at: model.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CoveragePlanResponse {
    pub id: i32,
    pub project_id: i32,
    pub strategy: Option<String>,
    pub organizations: Vec<String>,
    pub notes: Option<String>,
    pub created_at: String,
}

impl From<coverage_plan::Model> for CoveragePlanResponse {
    fn from(model: coverage_plan::Model) -> Self {
        Self {
            id: model.id,
            project_id: model.project_id,
            strategy: model.strategy,
            organizations: model.organizations.map(|list| list.0).unwrap_or_default(),
            notes: model.notes,
            created_at: model.created_at.to_rfc3339(),
        }
    }
}

/// A project, with its plans when they were loaded
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProjectResponse {
    pub id: i32,
    pub name: String,
    /// Name of the owning NGO
    pub ong_name: String,
    pub creador_ong_id: i32,
    pub description: String,
    pub country: String,
    pub location: String,
    pub project_types: Vec<String>,
    pub budget: f64,
    pub duration: i32,
    pub objectives: String,
    pub beneficiaries: String,
    /// Creation time (RFC 3339)
    #[schema(example = "2025-10-01T12:00:00+00:00")]
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_plan: Option<WorkPlanResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage_plan: Option<CoveragePlanResponse>,
}

impl From<project_definition::Model> for ProjectResponse {
    fn from(model: project_definition::Model) -> Self {
        Self {
            id: model.id,
            name: model.project_name,
            ong_name: model.ong_name,
            creador_ong_id: model.creador_ong_id,
            description: model.description,
            country: model.country,
            location: model.location,
            project_types: model.project_types.map(|list| list.0).unwrap_or_default(),
            budget: model.budget,
            duration: model.duration,
            objectives: model.objectives,
            beneficiaries: model.beneficiaries,
            created_at: model.created_at.to_rfc3339(),
            work_plan: None,
            coverage_plan: None,
        }
    }
}

impl From<ProjectWithPlans> for ProjectResponse {
    fn from(loaded: ProjectWithPlans) -> Self {
        Self {
            work_plan: loaded.work_plan.map(Into::into),
            coverage_plan: loaded.coverage_plan.map(Into::into),
            ..ProjectResponse::from(loaded.project)
        }
    }
}

fn new_project(
    body: CreateProjectRequest,
    creador_ong_id: i32,
    ong_name: String,
) -> Result<NewProject, ApiError> {
    let mut required = RequiredFields::default();
    let project_name = required.text("name", body.name);
    let description = required.text("description", body.description);
    let country = required.text("country", body.country);
    let location = required.text("location", body.location);
    let budget = required.value("budget", body.budget);
    let duration = required.value("duration", body.duration);
    let objectives = required.text("objectives", body.objectives);
    let beneficiaries = required.text("beneficiaries", body.beneficiaries);
    let stages = required.list("stages", body.stages);
    required.finish()?;

    let budget = ensure_amount("budget", budget)?;
    if duration <= 0 {
        return Err(validation_error(
            "Invalid duration",
            serde_json::json!({ "duration": "must be a positive number of months" }),
        ));
    }

    Ok(NewProject {
        creador_ong_id,
        ong_name,
        project_name,
        description,
        country,
        location,
        project_types: body.project_types,
        budget,
        duration,
        objectives,
        beneficiaries,
        stages,
        monitoring_plan: body.monitoring_plan,
        risk_analysis: body.risk_analysis,
        success_indicators: body.success_indicators,
        terms_accepted: body.terms_accepted.unwrap_or(false),
        strategy: body.strategy,
        organizations: body.organizations,
        notes: body.notes,
    })
}

/// List all projects, most recent first
#[utoipa::path(
    get,
    path = "/api/projects",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All projects", body = Vec<ProjectResponse>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError)
    ),
    tag = "projects"
)]
pub async fn list_projects(
    State(state): State<AppState>,
    _caller: AuthNgo,
) -> Result<Json<Vec<ProjectResponse>>, ApiError> {
    let projects = ProjectRepository::new(&state.db).list_all().await?;
    Ok(Json(projects.into_iter().map(Into::into).collect()))
}

/// Create a project with its work plan and coverage plan
#[utoipa::path(
    post,
    path = "/api/projects",
    security(("bearer_auth" = [])),
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project created", body = ProjectResponse),
        (status = 400, description = "Required fields missing", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Caller NGO no longer exists", body = ApiError)
    ),
    tag = "projects"
)]
pub async fn create_project(
    State(state): State<AppState>,
    caller: AuthNgo,
    payload: Result<Json<CreateProjectRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ProjectResponse>), ApiError> {
    let Json(body) = payload?;

    let ong = OngRepository::new(&state.db)
        .find_by_id(caller.ngo_id)
        .await?
        .ok_or_else(|| not_found("NGO not found"))?;

    let new = new_project(body, ong.id, ong.name)?;
    let created = ProjectRepository::new(&state.db)
        .create_with_plans(new)
        .await?;

    tracing::info!(
        ngo_id = caller.ngo_id,
        project_id = created.project.id,
        "Project created"
    );

    Ok((StatusCode::CREATED, Json(created.into())))
}
