//! Persistence implementations
//!
//! This module provides file-based implementations of the repository traits.

mod file_car_repo;

pub use file_car_repo::FileCarRepository;
