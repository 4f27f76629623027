//! # NGO Repository
//!
//! Credential store lookups and account creation.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

use crate::error::RepositoryError;
use crate::models::ong::{self, Entity as Ong};

/// Repository for NGO account records
pub struct OngRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> OngRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<ong::Model>, RepositoryError> {
        Ong::find_by_id(id)
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<ong::Model>, RepositoryError> {
        Ong::find()
            .filter(ong::Column::Name.eq(name))
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Insert a new NGO. `password_hash` must already be hashed.
    ///
    /// A duplicate name surfaces as a unique-violation database error.
    pub async fn create(
        &self,
        name: &str,
        password_hash: String,
    ) -> Result<ong::Model, RepositoryError> {
        let ong = ong::ActiveModel {
            name: Set(name.to_string()),
            password: Set(password_hash),
            ..Default::default()
        };

        ong.insert(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }
}
