use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

use super::memory_db;
use crate::db::connect_with_config;
use configs::DatabaseConfig;

/// Test basic connection against the in-memory backend
#[tokio::test]
async fn test_basic_connection() -> Result<()> {
    let db = connect_with_config(&DatabaseConfig::sqlite_memory()).await?;
    assert_eq!(db.get_database_backend(), DatabaseBackend::Sqlite);

    let stmt = Statement::from_string(DatabaseBackend::Sqlite, "SELECT 1 AS test".to_string());
    let row = db.query_one(stmt).await?.expect("one row");
    let value: i64 = row.try_get("", "test")?;
    assert_eq!(value, 1);
    Ok(())
}

/// Migrations are idempotent and can be rolled back
#[tokio::test]
async fn test_migrations_up_twice_and_down() -> Result<()> {
    let db = memory_db().await?;
    migration::Migrator::up(&db, None).await?;

    let pending = migration::Migrator::get_pending_migrations(&db).await?;
    assert!(pending.is_empty());

    migration::Migrator::down(&db, None).await?;
    let stmt = Statement::from_string(
        DatabaseBackend::Sqlite,
        "SELECT COUNT(*) AS n FROM sqlite_master WHERE type = 'table' AND name = 'villa'".to_string(),
    );
    let row = db.query_one(stmt).await?.expect("one row");
    let n: i64 = row.try_get("", "n")?;
    assert_eq!(n, 0);
    Ok(())
}

#[tokio::test]
async fn test_ping() -> Result<()> {
    let db = memory_db().await?;
    db.ping().await?;
    Ok(())
}
