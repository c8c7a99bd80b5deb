//! Case-insensitive unique index on villa names.
//!
//! The index sits on `first_name_key`, which the application fills with the
//! Unicode-lowercased name. SQL `LOWER()` only folds ASCII on SQLite.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const INDEX_NAME: &str = "idx_villa_first_name_key";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name(INDEX_NAME)
                    .table(Villa::Table)
                    .col(Villa::FirstNameKey)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name(INDEX_NAME).table(Villa::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Villa {
    Table,
    FirstNameKey,
}
