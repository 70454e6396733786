//! Adapters wiring config to the persistence and storage layer

use dealer_infra::persistence::FileCarRepository;
use dealer_infra::storage::FileCarStorage;
use dealer_types::Result;

use crate::app::DealershipService;
use crate::config::Config;

/// Dealership service over the file-based repository and storage
pub type FileDealership = DealershipService<FileCarRepository, FileCarStorage>;

/// Open file-based car repository
pub fn open_car_repo(config: &Config) -> Result<FileCarRepository> {
    FileCarRepository::open(config.data_dir()?)
}

/// Open file-based picture storage
pub fn open_car_storage(config: &Config) -> Result<FileCarStorage> {
    FileCarStorage::open(config.images_dir()?)
}

/// Open the dealership service with repository and storage from config
pub fn open_dealership(config: &Config) -> Result<FileDealership> {
    DealershipService::new(open_car_repo(config)?, open_car_storage(config)?)
}
