//! Picture and bulk-file storage

mod archive;
mod file_car_storage;

pub use file_car_storage::FileCarStorage;
