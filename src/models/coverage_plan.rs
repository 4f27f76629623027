//! Coverage plan entity model
//!
//! Container of a project's collaboration requests.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

use super::StringList;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "coverage_plans")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub project_id: i32,

    pub strategy: Option<String>,

    /// Partner organization names (JSON array)
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub organizations: Option<StringList>,

    pub notes: Option<String>,
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
    #[sea_orm(has_many = "super::pedido_colaboracion::Entity")]
    Pedidos,
}

impl Related<super::project_definition::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl Related<super::pedido_colaboracion::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pedidos.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
