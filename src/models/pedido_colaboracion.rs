//! Collaboration request entity model
//!
//! An ask for money, materials, labor, equipment or advice, attached to a
//! project through its coverage plan.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;

use super::RequestStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "pedidos_colaboracion")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// e.g. "dinero", "materiales", "mano de obra"
    pub request_type: String,

    pub description: String,
    pub amount_requested: f64,
    pub status: RequestStatus,
    pub coverage_plan_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::coverage_plan::Entity",
        from = "Column::CoveragePlanId",
        to = "super::coverage_plan::Column::Id"
    )]
    CoveragePlan,
    #[sea_orm(has_many = "super::compromiso::Entity")]
    Compromisos,
}

impl Related<super::coverage_plan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CoveragePlan.def()
    }
}

impl Related<super::compromiso::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Compromisos.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
