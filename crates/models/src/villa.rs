use sea_orm::{entity::prelude::*, DatabaseConnection, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::errors;

/// Upper bound on `first_name`, counted in characters.
pub const FIRST_NAME_MAX_LEN: usize = 30;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "villa")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    /// `first_name` lowercased in Rust; carries the unique index.
    pub first_name_key: String,
    pub last_name: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub details: Option<String>,
    #[sea_orm(column_type = "Double")]
    pub rate: f64,
    pub occupancy: i32,
    pub square_footage: i32,
    pub image_url: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub amenities: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Comparison key for `first_name`. Unicode-aware, unlike SQL `LOWER()`.
pub fn name_key(name: &str) -> String {
    name.to_lowercase()
}

pub fn validate_first_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() {
        return Err(errors::ModelError::Validation("firstName is required".into()));
    }
    if name.chars().count() > FIRST_NAME_MAX_LEN {
        return Err(errors::ModelError::Validation(format!(
            "firstName must be at most {FIRST_NAME_MAX_LEN} characters"
        )));
    }
    Ok(())
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .order_by_asc(Column::Id)
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Case-insensitive lookup on `first_name`.
pub async fn find_by_first_name(db: &DatabaseConnection, name: &str) -> Result<Option<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::FirstNameKey.eq(name_key(name)))
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}
