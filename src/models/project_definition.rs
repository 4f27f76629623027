//! Project definition entity model
//!
//! A project owned by exactly one NGO. The owning NGO's name is denormalized
//! into `ong_name` at creation time.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

use super::StringList;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "project_definitions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub project_name: String,

    /// Owning NGO name, copied from `ongs.name`
    pub ong_name: String,

    pub description: String,
    pub country: String,
    pub location: String,

    /// Category tags (JSON array)
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub project_types: Option<StringList>,

    pub budget: f64,

    /// Duration in months
    pub duration: i32,

    pub objectives: String,
    pub beneficiaries: String,
    pub created_at: DateTimeWithTimeZone,

    /// Owning NGO
    pub creador_ong_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::ong::Entity",
        from = "Column::CreadorOngId",
        to = "super::ong::Column::Id"
    )]
    CreadorOng,
    #[sea_orm(has_one = "super::work_plan::Entity")]
    WorkPlan,
    #[sea_orm(has_one = "super::coverage_plan::Entity")]
    CoveragePlan,
}

impl Related<super::ong::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CreadorOng.def()
    }
}

impl Related<super::work_plan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkPlan.def()
    }
}

impl Related<super::coverage_plan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CoveragePlan.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
