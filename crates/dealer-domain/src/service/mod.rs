//! Domain services
//!
//! Business logic that operates on domain models without touching storage.

pub mod car_filter;
pub mod validator;

pub use car_filter::{engine_filter_options, filter_cars, ENGINE_FILTER_ALL};
pub use validator::{validate_car, validate_car_on};
