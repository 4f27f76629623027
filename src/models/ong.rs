//! NGO entity model
//!
//! Registered organization accounts. `password` holds an Argon2 PHC hash,
//! never the plaintext.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "ongs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Unique account name
    #[sea_orm(unique)]
    pub name: String,

    /// PHC-formatted password hash
    pub password: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::project_definition::Entity")]
    Projects,
    #[sea_orm(has_many = "super::compromiso::Entity")]
    Compromisos,
}

impl Related<super::project_definition::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Projects.def()
    }
}

impl Related<super::compromiso::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Compromisos.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
