//! Work plan entity model

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

use super::Stages;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "work_plans")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub project_id: i32,

    /// Ordered stage objects (JSON array)
    #[sea_orm(column_type = "JsonBinary")]
    pub stages: Stages,

    pub monitoring_plan: Option<String>,
    pub risk_analysis: Option<String>,
    pub success_indicators: Option<String>,
    pub terms_accepted: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::project_definition::Entity",
        from = "Column::ProjectId",
        to = "super::project_definition::Column::Id"
    )]
    Project,
}

impl Related<super::project_definition::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
