//! Infrastructure layer
//!
//! Concrete implementations of the domain's repository and storage traits.

pub mod persistence;
pub mod storage;
