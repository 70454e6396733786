//! Storage trait for car pictures and bulk record files

use std::path::{Path, PathBuf};

use image::DynamicImage;

use dealer_types::{Car, Error};

/// A stored picture, decoded
#[derive(Debug, Clone)]
pub struct StoredImage {
    /// Location of the stored file
    pub path: PathBuf,
    pub image: DynamicImage,
}

/// File and image storage used by the dealership service.
///
/// Stored images are referred to by file name only; where they live is up to
/// the implementation.
pub trait CarStorage {
    /// Write cars to a JSON file, returning how many were written
    fn store_json(&self, file: &Path, cars: &[Car]) -> Result<usize, Error>;

    /// Read cars from a JSON file
    fn load_json(&self, file: &Path) -> Result<Vec<Car>, Error>;

    /// Copy a picture into storage, returning its stored file name
    fn save_image(&self, source: &Path) -> Result<String, Error>;

    /// Replace the contents of an existing stored picture
    fn update_image(&self, stored_name: &str, source: &Path) -> Result<(), Error>;

    /// Remove a stored picture
    fn delete_image(&self, stored_name: &str) -> Result<(), Error>;

    /// Remove every stored picture, returning how many were removed
    fn delete_all_images(&self) -> Result<usize, Error>;

    /// Load and decode a stored picture
    fn load_image(&self, stored_name: &str) -> Result<StoredImage, Error>;

    /// Bundle cars and their pictures into a ZIP archive
    fn export_zip(&self, file: &Path, cars: &[Car]) -> Result<(), Error>;

    /// Unpack a ZIP archive produced by `export_zip`, returning its cars
    fn load_from_zip(&self, file: &Path) -> Result<Vec<Car>, Error>;
}
