//! Migration to create the compromisos table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Compromisos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Compromisos::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Compromisos::PedidoId).integer().not_null())
                    .col(ColumnDef::new(Compromisos::OngId).integer().not_null())
                    .col(ColumnDef::new(Compromisos::Details).text().null())
                    .col(
                        ColumnDef::new(Compromisos::AmountCommitted)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Compromisos::Status)
                            .string_len(50)
                            .not_null()
                            .default("pending"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_compromisos_pedido_id")
                            .from(Compromisos::Table, Compromisos::PedidoId)
                            .to(PedidosColaboracion::Table, PedidosColaboracion::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_compromisos_ong_id")
                            .from(Compromisos::Table, Compromisos::OngId)
                            .to(Ongs::Table, Ongs::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_compromisos_pedido_id")
                    .table(Compromisos::Table)
                    .col(Compromisos::PedidoId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_compromisos_pedido_id").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Compromisos::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Compromisos {
    Table,
    Id,
    PedidoId,
    OngId,
    Details,
    AmountCommitted,
    Status,
}

#[derive(DeriveIden)]
enum PedidosColaboracion {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Ongs {
    Table,
    Id,
}
