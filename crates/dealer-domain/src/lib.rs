//! Domain layer for the car dealership manager
//!
//! Pure models and business rules, plus the traits infrastructure must implement.

pub mod model;
pub mod repository;
pub mod service;
pub mod storage;

pub use model::{placeholder_image, CarForm};
pub use repository::CarRepository;
pub use storage::{CarStorage, StoredImage};
