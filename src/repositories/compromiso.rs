//! # Commitment Repository

use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};

use crate::error::RepositoryError;
use crate::models::{
    CommitmentStatus,
    compromiso::{self, Entity as Compromiso},
    ong::{self, Entity as Ong},
    pedido_colaboracion::{self, Entity as PedidoColaboracion},
};

/// Fields of a new commitment.
#[derive(Debug, Clone)]
pub struct NewCompromiso {
    pub pedido_id: i32,
    pub ong_id: i32,
    pub details: Option<String>,
    pub amount_committed: f64,
}

/// A commitment with the request it targets and the NGO that made it.
#[derive(Debug, Clone)]
pub struct CompromisoDetail {
    pub compromiso: compromiso::Model,
    pub pedido: pedido_colaboracion::Model,
    pub ong: Option<ong::Model>,
}

/// Repository for commitments
pub struct CompromisoRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CompromisoRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<compromiso::Model>, RepositoryError> {
        Compromiso::find_by_id(id)
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Insert a commitment with status `pending`.
    pub async fn create(
        &self,
        new: NewCompromiso,
    ) -> Result<compromiso::Model, RepositoryError> {
        compromiso::ActiveModel {
            pedido_id: Set(new.pedido_id),
            ong_id: Set(new.ong_id),
            details: Set(new.details),
            amount_committed: Set(new.amount_committed),
            status: Set(CommitmentStatus::Pending),
            ..Default::default()
        }
        .insert(self.db)
        .await
        .map_err(RepositoryError::database_error)
    }

    /// Set status to `fulfilled`. Already fulfilled rows are written again unchanged.
    pub async fn mark_fulfilled(
        &self,
        compromiso: compromiso::Model,
    ) -> Result<compromiso::Model, RepositoryError> {
        let mut active = compromiso.into_active_model();
        active.status = Set(CommitmentStatus::Fulfilled);
        active
            .update(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Commitments across every request of one coverage plan.
    pub async fn list_for_coverage_plan(
        &self,
        coverage_plan_id: i32,
    ) -> Result<Vec<CompromisoDetail>, RepositoryError> {
        let pedidos: HashMap<i32, pedido_colaboracion::Model> = PedidoColaboracion::find()
            .filter(pedido_colaboracion::Column::CoveragePlanId.eq(coverage_plan_id))
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)?
            .into_iter()
            .map(|pedido| (pedido.id, pedido))
            .collect();

        if pedidos.is_empty() {
            return Ok(Vec::new());
        }

        let rows = Compromiso::find()
            .filter(compromiso::Column::PedidoId.is_in(pedidos.keys().copied()))
            .order_by_asc(compromiso::Column::PedidoId)
            .order_by_asc(compromiso::Column::Id)
            .find_also_related(Ong)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(rows
            .into_iter()
            .filter_map(|(compromiso, ong)| {
                let pedido = pedidos.get(&compromiso.pedido_id)?.clone();
                Some(CompromisoDetail {
                    compromiso,
                    pedido,
                    ong,
                })
            })
            .collect())
    }
}
