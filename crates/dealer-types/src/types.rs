//! Car record types shared across the workspace

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Repository-assigned identity of a car
pub type CarId = i64;

/// Propulsion category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EngineType {
    Gasoline,
    Diesel,
    Electric,
    Hybrid,
}

impl EngineType {
    pub const ALL: [EngineType; 4] = [
        EngineType::Gasoline,
        EngineType::Diesel,
        EngineType::Electric,
        EngineType::Hybrid,
    ];

    /// Canonical upper-case name ("GASOLINE", "DIESEL", ...)
    pub fn name(&self) -> &'static str {
        match self {
            EngineType::Gasoline => "GASOLINE",
            EngineType::Diesel => "DIESEL",
            EngineType::Electric => "ELECTRIC",
            EngineType::Hybrid => "HYBRID",
        }
    }

    /// Names of every engine type, in declaration order
    pub fn names() -> Vec<String> {
        Self::ALL.iter().map(|e| e.name().to_string()).collect()
    }
}

impl fmt::Display for EngineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EngineType {
    type Err = crate::ValidationError;

    /// Case-insensitive, surrounding whitespace ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|e| e.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| crate::ValidationError::UnknownEngineType(trimmed.to_string()))
    }
}

/// A vehicle on the dealership's lot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    /// `None` until the repository assigns one
    #[serde(default)]
    pub id: Option<CarId>,
    pub license_plate: String,
    pub brand: String,
    pub model: String,
    pub engine_type: EngineType,
    pub registration_date: NaiveDate,
    /// Stored image file name; `None` (or empty) means "no image"
    #[serde(default)]
    pub image_file_name: Option<String>,
}

impl Car {
    pub fn new(
        license_plate: impl Into<String>,
        brand: impl Into<String>,
        model: impl Into<String>,
        engine_type: EngineType,
        registration_date: NaiveDate,
    ) -> Self {
        Self {
            id: None,
            license_plate: license_plate.into(),
            brand: brand.into(),
            model: model.into(),
            engine_type,
            registration_date,
            image_file_name: None,
        }
    }

    pub fn with_id(mut self, id: CarId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_image(mut self, image_file_name: impl Into<String>) -> Self {
        self.image_file_name = Some(image_file_name.into());
        self
    }

    /// Stored image name, treating an empty string as "no image"
    pub fn image(&self) -> Option<&str> {
        self.image_file_name.as_deref().filter(|name| !name.is_empty())
    }

    pub fn has_image(&self) -> bool {
        self.image().is_some()
    }

    /// Copy with identity and image reference cleared
    pub fn stripped(&self) -> Self {
        Self {
            id: None,
            image_file_name: None,
            ..self.clone()
        }
    }
}
