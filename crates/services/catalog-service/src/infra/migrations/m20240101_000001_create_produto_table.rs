//! Migration: Create the produto (product catalog) table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Produto::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Produto::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Produto::Hash).uuid().not_null())
                    .col(ColumnDef::new(Produto::Nome).string().not_null())
                    .col(
                        ColumnDef::new(Produto::Descricao)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Produto::Ean13).string().not_null())
                    .col(ColumnDef::new(Produto::Preco).double().not_null())
                    .col(
                        ColumnDef::new(Produto::Quantidade)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Produto::EstoqueMin)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Produto::Lativo)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Produto::Dtcreate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Produto::Dtupdate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // hash is the business key; every lookup goes through it
        manager
            .create_index(
                Index::create()
                    .name("idx_produto_hash")
                    .table(Produto::Table)
                    .col(Produto::Hash)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_produto_lativo")
                    .table(Produto::Table)
                    .col(Produto::Lativo)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Produto::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Produto {
    Table,
    Id,
    Hash,
    Nome,
    Descricao,
    Ean13,
    Preco,
    Quantidade,
    EstoqueMin,
    Lativo,
    Dtcreate,
    Dtupdate,
}
