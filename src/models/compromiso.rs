//! Commitment entity model
//!
//! A pledge by one NGO toward another NGO's collaboration request.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;

use super::CommitmentStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "compromisos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub pedido_id: i32,

    /// The committing NGO; never the owner of the request's project
    pub ong_id: i32,

    pub details: Option<String>,
    pub amount_committed: f64,
    pub status: CommitmentStatus,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::pedido_colaboracion::Entity",
        from = "Column::PedidoId",
        to = "super::pedido_colaboracion::Column::Id"
    )]
    Pedido,
    #[sea_orm(
        belongs_to = "super::ong::Entity",
        from = "Column::OngId",
        to = "super::ong::Column::Id"
    )]
    CompromisoOng,
}

impl Related<super::pedido_colaboracion::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pedido.def()
    }
}

impl Related<super::ong::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CompromisoOng.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
