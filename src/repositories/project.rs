//! # Project Repository
//!
//! Project catalog access. A project is always written together with its work
//! plan and coverage plan.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use crate::error::RepositoryError;
use crate::models::{
    Stage, Stages, StringList, coverage_plan,
    project_definition::{self, Entity as ProjectDefinition},
    work_plan,
};

/// Everything needed to create a project and its two plans.
#[derive(Debug, Clone, Default)]
pub struct NewProject {
    pub creador_ong_id: i32,
    pub ong_name: String,
    pub project_name: String,
    pub description: String,
    pub country: String,
    pub location: String,
    pub project_types: Option<Vec<String>>,
    pub budget: f64,
    pub duration: i32,
    pub objectives: String,
    pub beneficiaries: String,
    pub stages: Vec<Stage>,
    pub monitoring_plan: Option<String>,
    pub risk_analysis: Option<String>,
    pub success_indicators: Option<String>,
    pub terms_accepted: bool,
    pub strategy: Option<String>,
    pub organizations: Option<Vec<String>>,
    pub notes: Option<String>,
}

/// A project together with the plans created alongside it.
#[derive(Debug, Clone)]
pub struct ProjectWithPlans {
    pub project: project_definition::Model,
    pub work_plan: Option<work_plan::Model>,
    pub coverage_plan: Option<coverage_plan::Model>,
}

/// Repository for projects and their plans
pub struct ProjectRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ProjectRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(
        &self,
        id: i32,
    ) -> Result<Option<project_definition::Model>, RepositoryError> {
        ProjectDefinition::find_by_id(id)
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// All projects, most recently created first.
    pub async fn list_all(&self) -> Result<Vec<project_definition::Model>, RepositoryError> {
        ProjectDefinition::find()
            .order_by_desc(project_definition::Column::CreatedAt)
            .order_by_desc(project_definition::Column::Id)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn find_by_name_for_owner(
        &self,
        creador_ong_id: i32,
        project_name: &str,
    ) -> Result<Option<project_definition::Model>, RepositoryError> {
        ProjectDefinition::find()
            .filter(project_definition::Column::CreadorOngId.eq(creador_ong_id))
            .filter(project_definition::Column::ProjectName.eq(project_name))
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn find_coverage_plan(
        &self,
        project_id: i32,
    ) -> Result<Option<coverage_plan::Model>, RepositoryError> {
        coverage_plan::Entity::find()
            .filter(coverage_plan::Column::ProjectId.eq(project_id))
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }
}

impl<'a, C: ConnectionTrait + TransactionTrait> ProjectRepository<'a, C> {
    /// Insert the project, its work plan and its coverage plan in one transaction.
    pub async fn create_with_plans(
        &self,
        new: NewProject,
    ) -> Result<ProjectWithPlans, RepositoryError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(RepositoryError::database_error)?;
        let now = Utc::now();

        let project = project_definition::ActiveModel {
            project_name: Set(new.project_name),
            ong_name: Set(new.ong_name),
            description: Set(new.description),
            country: Set(new.country),
            location: Set(new.location),
            project_types: Set(new.project_types.map(StringList::from)),
            budget: Set(new.budget),
            duration: Set(new.duration),
            objectives: Set(new.objectives),
            beneficiaries: Set(new.beneficiaries),
            created_at: Set(now.into()),
            creador_ong_id: Set(new.creador_ong_id),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(RepositoryError::database_error)?;

        let work_plan = work_plan::ActiveModel {
            project_id: Set(project.id),
            stages: Set(Stages(new.stages)),
            monitoring_plan: Set(new.monitoring_plan),
            risk_analysis: Set(new.risk_analysis),
            success_indicators: Set(new.success_indicators),
            terms_accepted: Set(new.terms_accepted),
            created_at: Set(now.into()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(RepositoryError::database_error)?;

        let coverage_plan = coverage_plan::ActiveModel {
            project_id: Set(project.id),
            strategy: Set(new.strategy),
            organizations: Set(new.organizations.map(StringList::from)),
            notes: Set(new.notes),
            created_at: Set(now.into()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(RepositoryError::database_error)?;

        txn.commit()
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(ProjectWithPlans {
            project,
            work_plan: Some(work_plan),
            coverage_plan: Some(coverage_plan),
        })
    }
}
