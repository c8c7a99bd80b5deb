use sea_orm::{ActiveModelTrait, ActiveValue::{NotSet, Set}, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel, SqlErr};

use models::villa;

use crate::errors::ServiceError;
use crate::villa::repository::VillaRepository;

/// SeaORM-backed repository implementation.
pub struct SeaOrmVillaRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmVillaRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

/// The unique index on `first_name_key` is the authoritative duplicate check.
fn map_write_err(e: DbErr) -> ServiceError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => ServiceError::invalid("villa already exists"),
        _ => match e {
            DbErr::RecordNotUpdated | DbErr::RecordNotFound(_) => ServiceError::not_found("villa"),
            other => ServiceError::Db(other.to_string()),
        },
    }
}

#[async_trait::async_trait]
impl VillaRepository for SeaOrmVillaRepository {
    async fn find_all(&self) -> Result<Vec<villa::Model>, ServiceError> {
        Ok(villa::list(&self.db).await?)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<villa::Model>, ServiceError> {
        villa::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn find_by_first_name(&self, first_name: &str) -> Result<Option<villa::Model>, ServiceError> {
        Ok(villa::find_by_first_name(&self.db, first_name).await?)
    }

    async fn insert(&self, villa: villa::Model) -> Result<villa::Model, ServiceError> {
        let key = villa::name_key(&villa.first_name);
        let mut am = villa.into_active_model().reset_all();
        am.id = NotSet;
        am.first_name_key = Set(key);
        am.insert(&self.db).await.map_err(map_write_err)
    }

    async fn update(&self, villa: villa::Model) -> Result<villa::Model, ServiceError> {
        // Every column is marked set so the UPDATE overwrites the full row.
        let key = villa::name_key(&villa.first_name);
        let mut am = villa.into_active_model().reset_all();
        am.first_name_key = Set(key);
        am.update(&self.db).await.map_err(map_write_err)
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let res = villa::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(res.rows_affected > 0)
    }
}
