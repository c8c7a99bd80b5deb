/// Database connection and migration tests
pub mod db_tests;


use configs::DatabaseConfig;
use sea_orm::DatabaseConnection;

/// Fresh in-memory database with the schema applied.
pub(crate) async fn memory_db() -> anyhow::Result<DatabaseConnection> {
    crate::db::connect_and_migrate(&DatabaseConfig::sqlite_memory()).await
}
