//! # Coverage Workflow
//!
//! Collaboration requests and the commitments NGOs make against them.
//!
//! Ownership of a request is resolved by walking
//! request → coverage plan → project → `creador_ong_id`. The owner may add
//! requests, list commitments and fulfil them; only other NGOs may commit.

use sea_orm::ConnectionTrait;
use thiserror::Error;

use crate::error::{ApiError, RepositoryError, forbidden, not_found};
use crate::models::{compromiso, pedido_colaboracion, project_definition};
use crate::repositories::{
    CompromisoDetail, CompromisoRepository, NewCompromiso, NewPedido, OpenPedido,
    PedidoRepository, ProjectRepository,
};

/// Rule violations and lookup failures in the coverage workflow.
#[derive(Debug, Error)]
pub enum CoverageError {
    #[error("collaboration request {0} not found")]
    RequestNotFound(i32),
    #[error("collaboration request {0} is no longer open")]
    RequestNotOpen(i32),
    #[error("commitment {0} not found")]
    CommitmentNotFound(i32),
    #[error("project {0} not found")]
    ProjectNotFound(i32),
    #[error("project {0} has no coverage plan")]
    MissingCoveragePlan(i32),
    #[error("an NGO cannot commit to its own project's request")]
    OwnRequest,
    #[error("caller does not own project {0}")]
    NotProjectOwner(i32),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<CoverageError> for ApiError {
    fn from(error: CoverageError) -> Self {
        match error {
            CoverageError::RequestNotFound(_) | CoverageError::RequestNotOpen(_) => {
                not_found("Collaboration request not found or not open")
            }
            CoverageError::CommitmentNotFound(_) => not_found("Commitment not found"),
            CoverageError::ProjectNotFound(_) => not_found("Project not found"),
            CoverageError::MissingCoveragePlan(_) => {
                not_found("Project has no coverage plan")
            }
            CoverageError::OwnRequest => {
                forbidden(Some("An NGO cannot commit to its own project's request"))
            }
            CoverageError::NotProjectOwner(_) => {
                forbidden(Some("Only the project owner may perform this action"))
            }
            CoverageError::Repository(err) => err.into(),
        }
    }
}

/// Amount and details offered by a committing NGO.
#[derive(Debug, Clone)]
pub struct Pledge {
    pub details: Option<String>,
    pub amount: f64,
}

/// A new request as submitted by the project owner.
#[derive(Debug, Clone)]
pub struct RequestDraft {
    pub request_type: String,
    pub description: String,
    pub amount: f64,
}

/// Coverage rules over a database connection.
pub struct CoverageWorkflow<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CoverageWorkflow<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Open requests across all projects.
    pub async fn open_requests(&self) -> Result<Vec<OpenPedido>, CoverageError> {
        Ok(PedidoRepository::new(self.db)
            .list_open_with_project()
            .await?)
    }

    /// Every request of an existing project, whatever its status.
    pub async fn project_requests(
        &self,
        project_id: i32,
    ) -> Result<Vec<pedido_colaboracion::Model>, CoverageError> {
        self.project(project_id).await?;
        Ok(PedidoRepository::new(self.db)
            .list_for_project(project_id)
            .await?)
    }

    /// Record a pending commitment from `caller` against an open request.
    ///
    /// Committed amounts are not capped by the requested amount.
    pub async fn commit(
        &self,
        caller: i32,
        request_id: i32,
        pledge: Pledge,
    ) -> Result<compromiso::Model, CoverageError> {
        let pedidos = PedidoRepository::new(self.db);
        let pedido = pedidos
            .find_by_id(request_id)
            .await?
            .ok_or(CoverageError::RequestNotFound(request_id))?;

        if !pedido.status.is_open() {
            return Err(CoverageError::RequestNotOpen(request_id));
        }

        let project = pedidos
            .find_project(&pedido)
            .await?
            .ok_or(CoverageError::RequestNotFound(request_id))?;

        if project.creador_ong_id == caller {
            tracing::warn!(
                ngo_id = caller,
                request_id,
                project_id = project.id,
                "Rejected commitment to own project's request"
            );
            return Err(CoverageError::OwnRequest);
        }

        let compromiso = CompromisoRepository::new(self.db)
            .create(NewCompromiso {
                pedido_id: pedido.id,
                ong_id: caller,
                details: pledge.details,
                amount_committed: pledge.amount,
            })
            .await?;

        Ok(compromiso)
    }

    /// Mark a commitment fulfilled. Only the owner of the request's project may.
    pub async fn fulfill(
        &self,
        caller: i32,
        commitment_id: i32,
    ) -> Result<compromiso::Model, CoverageError> {
        let compromisos = CompromisoRepository::new(self.db);
        let compromiso = compromisos
            .find_by_id(commitment_id)
            .await?
            .ok_or(CoverageError::CommitmentNotFound(commitment_id))?;

        let pedidos = PedidoRepository::new(self.db);
        let pedido = pedidos
            .find_by_id(compromiso.pedido_id)
            .await?
            .ok_or(CoverageError::CommitmentNotFound(commitment_id))?;
        let project = pedidos
            .find_project(&pedido)
            .await?
            .ok_or(CoverageError::CommitmentNotFound(commitment_id))?;

        self.ensure_owner(caller, &project)?;

        Ok(compromisos.mark_fulfilled(compromiso).await?)
    }

    /// Add an open request to the caller's project.
    pub async fn add_request(
        &self,
        caller: i32,
        project_id: i32,
        draft: RequestDraft,
    ) -> Result<pedido_colaboracion::Model, CoverageError> {
        let project = self.project(project_id).await?;
        let coverage_plan = ProjectRepository::new(self.db)
            .find_coverage_plan(project.id)
            .await?
            .ok_or(CoverageError::MissingCoveragePlan(project_id))?;

        self.ensure_owner(caller, &project)?;

        Ok(PedidoRepository::new(self.db)
            .create(NewPedido {
                coverage_plan_id: coverage_plan.id,
                request_type: draft.request_type,
                description: draft.description,
                amount_requested: draft.amount,
            })
            .await?)
    }

    /// All commitments across the caller's project. Empty without a coverage plan.
    pub async fn project_commitments(
        &self,
        caller: i32,
        project_id: i32,
    ) -> Result<Vec<CompromisoDetail>, CoverageError> {
        let project = self.project(project_id).await?;
        self.ensure_owner(caller, &project)?;

        let Some(coverage_plan) = ProjectRepository::new(self.db)
            .find_coverage_plan(project.id)
            .await?
        else {
            return Ok(Vec::new());
        };

        Ok(CompromisoRepository::new(self.db)
            .list_for_coverage_plan(coverage_plan.id)
            .await?)
    }

    async fn project(&self, project_id: i32) -> Result<project_definition::Model, CoverageError> {
        ProjectRepository::new(self.db)
            .find_by_id(project_id)
            .await?
            .ok_or(CoverageError::ProjectNotFound(project_id))
    }

    fn ensure_owner(
        &self,
        caller: i32,
        project: &project_definition::Model,
    ) -> Result<(), CoverageError> {
        if project.creador_ong_id == caller {
            return Ok(());
        }

        tracing::warn!(
            ngo_id = caller,
            project_id = project.id,
            owner_id = project.creador_ong_id,
            "Rejected action by non-owner"
        );
        Err(CoverageError::NotProjectOwner(project.id))
    }
}
