//! # Collaboration Request Repository

use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set,
};

use crate::error::RepositoryError;
use crate::models::{
    RequestStatus, coverage_plan,
    pedido_colaboracion::{self, Entity as PedidoColaboracion},
    project_definition::{self, Entity as ProjectDefinition},
};

/// Fields of a new collaboration request.
#[derive(Debug, Clone)]
pub struct NewPedido {
    pub coverage_plan_id: i32,
    pub request_type: String,
    pub description: String,
    pub amount_requested: f64,
}

/// An open request joined with the project it belongs to.
#[derive(Debug, Clone)]
pub struct OpenPedido {
    pub pedido: pedido_colaboracion::Model,
    pub project: project_definition::Model,
}

/// Repository for collaboration requests
pub struct PedidoRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PedidoRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(
        &self,
        id: i32,
    ) -> Result<Option<pedido_colaboracion::Model>, RepositoryError> {
        PedidoColaboracion::find_by_id(id)
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Insert a request with status `open`.
    pub async fn create(
        &self,
        new: NewPedido,
    ) -> Result<pedido_colaboracion::Model, RepositoryError> {
        pedido_colaboracion::ActiveModel {
            request_type: Set(new.request_type),
            description: Set(new.description),
            amount_requested: Set(new.amount_requested),
            status: Set(RequestStatus::Open),
            coverage_plan_id: Set(new.coverage_plan_id),
            ..Default::default()
        }
        .insert(self.db)
        .await
        .map_err(RepositoryError::database_error)
    }

    /// Every request of a project regardless of status, oldest first.
    pub async fn list_for_project(
        &self,
        project_id: i32,
    ) -> Result<Vec<pedido_colaboracion::Model>, RepositoryError> {
        PedidoColaboracion::find()
            .join(
                sea_orm::JoinType::InnerJoin,
                pedido_colaboracion::Relation::CoveragePlan.def(),
            )
            .filter(coverage_plan::Column::ProjectId.eq(project_id))
            .order_by_asc(pedido_colaboracion::Column::Id)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Requests still open, each with its project.
    pub async fn list_open_with_project(&self) -> Result<Vec<OpenPedido>, RepositoryError> {
        let rows = PedidoColaboracion::find()
            .filter(pedido_colaboracion::Column::Status.ne(RequestStatus::Covered))
            .order_by_asc(pedido_colaboracion::Column::Id)
            .find_also_related(coverage_plan::Entity)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        let project_ids: Vec<i32> = rows
            .iter()
            .filter_map(|(_, plan)| plan.as_ref().map(|plan| plan.project_id))
            .collect();

        let projects: HashMap<i32, project_definition::Model> = if project_ids.is_empty() {
            HashMap::new()
        } else {
            ProjectDefinition::find()
                .filter(project_definition::Column::Id.is_in(project_ids))
                .all(self.db)
                .await
                .map_err(RepositoryError::database_error)?
                .into_iter()
                .map(|project| (project.id, project))
                .collect()
        };

        Ok(rows
            .into_iter()
            .filter_map(|(pedido, plan)| {
                let project = projects.get(&plan?.project_id)?.clone();
                Some(OpenPedido { pedido, project })
            })
            .collect())
    }

    /// The project a request belongs to, via its coverage plan.
    pub async fn find_project(
        &self,
        pedido: &pedido_colaboracion::Model,
    ) -> Result<Option<project_definition::Model>, RepositoryError> {
        ProjectDefinition::find()
            .join(
                sea_orm::JoinType::InnerJoin,
                project_definition::Relation::CoveragePlan.def(),
            )
            .filter(coverage_plan::Column::Id.eq(pedido.coverage_plan_id))
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Move a request to `covered`. There is no way back to `open`.
    pub async fn mark_covered(
        &self,
        pedido: pedido_colaboracion::Model,
    ) -> Result<pedido_colaboracion::Model, RepositoryError> {
        let mut active = pedido.into_active_model();
        active.status = Set(RequestStatus::Covered);
        active
            .update(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }
}
