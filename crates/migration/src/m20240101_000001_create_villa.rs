//! Create `villa` table.
//!
//! Single listing table; the id is assigned by the database.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Villa::Table)
                    .if_not_exists()
                    .col(pk_auto(Villa::Id))
                    .col(string_len(Villa::FirstName, 30).not_null())
                    .col(string(Villa::FirstNameKey).not_null())
                    .col(string_null(Villa::LastName))
                    .col(text_null(Villa::Details))
                    .col(double(Villa::Rate).not_null())
                    .col(integer(Villa::Occupancy).not_null().default(0))
                    .col(integer(Villa::SquareFootage).not_null().default(0))
                    .col(string_null(Villa::ImageUrl))
                    .col(text_null(Villa::Amenities))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Villa::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Villa {
    Table,
    Id,
    FirstName,
    FirstNameKey,
    LastName,
    Details,
    Rate,
    Occupancy,
    SquareFootage,
    ImageUrl,
    Amenities,
}
