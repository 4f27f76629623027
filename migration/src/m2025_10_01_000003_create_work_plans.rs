//! Migration to create the work_plans table.
//!
//! Stages are stored as a JSON array of `{name, start, end, activities, resources}`
//! objects so the column works on both Postgres and SQLite.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WorkPlans::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WorkPlans::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(WorkPlans::ProjectId).integer().not_null())
                    .col(ColumnDef::new(WorkPlans::Stages).json_binary().not_null())
                    .col(ColumnDef::new(WorkPlans::MonitoringPlan).text().null())
                    .col(ColumnDef::new(WorkPlans::RiskAnalysis).text().null())
                    .col(ColumnDef::new(WorkPlans::SuccessIndicators).text().null())
                    .col(
                        ColumnDef::new(WorkPlans::TermsAccepted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(WorkPlans::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_work_plans_project_id")
                            .from(WorkPlans::Table, WorkPlans::ProjectId)
                            .to(ProjectDefinitions::Table, ProjectDefinitions::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WorkPlans::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum WorkPlans {
    Table,
    Id,
    ProjectId,
    Stages,
    MonitoringPlan,
    RiskAnalysis,
    SuccessIndicators,
    TermsAccepted,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ProjectDefinitions {
    Table,
    Id,
}
