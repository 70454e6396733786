//! Application layer
//!
//! Use cases that coordinate domain, infrastructure, and UI state.

pub mod dealership_service;

pub use dealership_service::DealershipService;
