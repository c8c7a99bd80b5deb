use models::villa;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationErrors;

/// Wire shape of a villa. Mirrors the stored row, but is converted explicitly
/// so either side can change without leaking into the other.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VillaTransfer {
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    pub rate: f64,
    #[serde(default)]
    pub occupancy: i32,
    #[serde(default)]
    pub square_footage: i32,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub amenities: Option<String>,
}

impl VillaTransfer {
    /// Field rules applied to every body that reaches storage.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Err(e) = villa::validate_first_name(&self.first_name) {
            errors.add("firstName", e.to_string());
        }
        if !self.rate.is_finite() {
            errors.add("rate", "rate must be a finite number");
        }
        errors.into_result()
    }

    /// Storage shape. The id is carried as-is; inserts ignore it.
    pub fn into_model(self) -> villa::Model {
        villa::Model {
            id: self.id,
            first_name_key: villa::name_key(&self.first_name),
            first_name: self.first_name,
            last_name: self.last_name,
            details: self.details,
            rate: self.rate,
            occupancy: self.occupancy,
            square_footage: self.square_footage,
            image_url: self.image_url,
            amenities: self.amenities,
        }
    }
}

impl From<villa::Model> for VillaTransfer {
    fn from(m: villa::Model) -> Self {
        Self {
            id: m.id,
            first_name: m.first_name,
            last_name: m.last_name,
            details: m.details,
            rate: m.rate,
            occupancy: m.occupancy,
            square_footage: m.square_footage,
            image_url: m.image_url,
            amenities: m.amenities,
        }
    }
}
