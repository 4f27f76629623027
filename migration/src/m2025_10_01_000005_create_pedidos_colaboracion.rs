//! Migration to create the pedidos_colaboracion table.
//!
//! Collaboration requests hang off a coverage plan and start out `open`.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PedidosColaboracion::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PedidosColaboracion::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PedidosColaboracion::RequestType)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PedidosColaboracion::Description)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PedidosColaboracion::AmountRequested)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(PedidosColaboracion::Status)
                            .string_len(50)
                            .not_null()
                            .default("open"),
                    )
                    .col(
                        ColumnDef::new(PedidosColaboracion::CoveragePlanId)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pedidos_colaboracion_coverage_plan_id")
                            .from(
                                PedidosColaboracion::Table,
                                PedidosColaboracion::CoveragePlanId,
                            )
                            .to(CoveragePlans::Table, CoveragePlans::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Open-request listing filters on status
        manager
            .create_index(
                Index::create()
                    .name("idx_pedidos_colaboracion_status")
                    .table(PedidosColaboracion::Table)
                    .col(PedidosColaboracion::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_pedidos_colaboracion_coverage_plan_id")
                    .table(PedidosColaboracion::Table)
                    .col(PedidosColaboracion::CoveragePlanId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_pedidos_colaboracion_status")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_pedidos_colaboracion_coverage_plan_id")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(PedidosColaboracion::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum PedidosColaboracion {
    Table,
    Id,
    RequestType,
    Description,
    AmountRequested,
    Status,
    CoveragePlanId,
}

#[derive(DeriveIden)]
enum CoveragePlans {
    Table,
    Id,
}
