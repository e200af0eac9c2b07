//! Create `clientes` table keyed by the caller-supplied `dni`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Clientes::Table)
                    .if_not_exists()
                    .col(string_len(Clientes::Dni, 3).primary_key())
                    .col(string_len(Clientes::Nombre, 30).not_null())
                    .col(string_len(Clientes::Apellido, 30).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Clientes::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Clientes { Table, Dni, Nombre, Apellido }
