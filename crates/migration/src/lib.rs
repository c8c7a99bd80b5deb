//! Migrator registering the villa schema migrations in order.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_villa;
mod m20240101_000002_villa_first_name_unique;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_villa::Migration),
            Box::new(m20240101_000002_villa_first_name_unique::Migration),
        ]
    }
}
