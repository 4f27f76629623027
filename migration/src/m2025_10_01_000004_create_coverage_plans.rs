//! Migration to create the coverage_plans table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CoveragePlans::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CoveragePlans::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CoveragePlans::ProjectId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CoveragePlans::Strategy).text().null())
                    .col(
                        ColumnDef::new(CoveragePlans::Organizations)
                            .json_binary()
                            .null(),
                    )
                    .col(ColumnDef::new(CoveragePlans::Notes).text().null())
                    .col(
                        ColumnDef::new(CoveragePlans::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_coverage_plans_project_id")
                            .from(CoveragePlans::Table, CoveragePlans::ProjectId)
                            .to(ProjectDefinitions::Table, ProjectDefinitions::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_coverage_plans_project_id")
                    .table(CoveragePlans::Table)
                    .col(CoveragePlans::ProjectId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_coverage_plans_project_id").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(CoveragePlans::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CoveragePlans {
    Table,
    Id,
    ProjectId,
    Strategy,
    Organizations,
    Notes,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ProjectDefinitions {
    Table,
    Id,
}
