//! Migration to create the ongs table.
//!
//! NGO accounts are the only principal in the system. Names are unique and the
//! password column only ever holds a PHC-formatted hash.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ongs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Ongs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Ongs::Name)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Ongs::Password).text().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Ongs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Ongs {
    Table,
    Id,
    Name,
    Password,
}
