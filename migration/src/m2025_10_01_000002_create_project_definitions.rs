//! Migration to create the project_definitions table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProjectDefinitions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProjectDefinitions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ProjectDefinitions::ProjectName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProjectDefinitions::OngName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProjectDefinitions::Description)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProjectDefinitions::Country)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProjectDefinitions::Location)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProjectDefinitions::ProjectTypes)
                            .json_binary()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ProjectDefinitions::Budget)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProjectDefinitions::Duration)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProjectDefinitions::Objectives)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProjectDefinitions::Beneficiaries)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProjectDefinitions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ProjectDefinitions::CreadorOngId)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_definitions_creador_ong_id")
                            .from(ProjectDefinitions::Table, ProjectDefinitions::CreadorOngId)
                            .to(Ongs::Table, Ongs::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_project_definitions_creador_ong_id")
                    .table(ProjectDefinitions::Table)
                    .col(ProjectDefinitions::CreadorOngId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_project_definitions_creador_ong_id")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ProjectDefinitions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ProjectDefinitions {
    Table,
    Id,
    ProjectName,
    OngName,
    Description,
    Country,
    Location,
    ProjectTypes,
    Budget,
    Duration,
    Objectives,
    Beneficiaries,
    CreatedAt,
    CreadorOngId,
}

#[derive(DeriveIden)]
enum Ongs {
    Table,
    Id,
}
