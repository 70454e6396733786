//! Application service layer - config, state, dealership use cases

pub mod app;
pub mod config;
pub mod repository;
pub mod state;

pub use app::DealershipService;
pub use config::Config;
pub use state::{OperationMode, State, StateStore};
