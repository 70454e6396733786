//! Error types for the dealership manager

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),
}

/// Business validation failures for a car record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("License plate is required")]
    MissingPlate,

    #[error("License plate '{0}' is too long (max {max} characters)", max = crate::MAX_PLATE_LEN)]
    PlateTooLong(String),

    #[error("License plate '{0}' contains invalid characters")]
    InvalidPlate(String),

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{field} is too long (max {max} characters)")]
    FieldTooLong { field: &'static str, max: usize },

    #[error("Unknown engine type: {0}")]
    UnknownEngineType(String),

    #[error("Registration date is required")]
    MissingRegistrationDate,

    #[error("Registration date {0} is out of range")]
    RegistrationDateOutOfRange(chrono::NaiveDate),

    #[error("Car has no identity; select a saved car before editing")]
    MissingId,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Archive error: {0}")]
    Zip(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("A car with license plate '{0}' already exists")]
    PlateExists(String),

    #[error("Car id {0} appears more than once")]
    DuplicateId(crate::CarId),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("No car selected")]
    NoSelection,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Repository error: {0}")]
    Repository(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            other => Error::Zip(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
