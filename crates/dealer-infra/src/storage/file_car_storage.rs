//! File-system implementation of CarStorage

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::{Path, PathBuf};

use uuid::Uuid;
use walkdir::WalkDir;

use dealer_domain::{CarStorage, StoredImage};
use dealer_types::{Car, Error, Result};

use super::archive;

/// Stores car pictures in a single directory.
///
/// Pictures are copied in under fresh `<uuid>.<ext>` names so two cars never
/// share a file.
pub struct FileCarStorage {
    images_dir: PathBuf,
}

impl FileCarStorage {
    /// Open storage rooted at `images_dir`, creating it if needed
    pub fn open(images_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&images_dir)?;
        Ok(Self { images_dir })
    }

    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    /// Resolve a stored name inside the images directory.
    ///
    /// Names are plain file names; anything with a path component is refused.
    pub fn stored_path(&self, stored_name: &str) -> Result<PathBuf> {
        let plain = Path::new(stored_name)
            .file_name()
            .is_some_and(|f| f == stored_name);
        if stored_name.is_empty() || !plain {
            return Err(Error::Storage(format!("Invalid stored image name: {}", stored_name)));
        }
        Ok(self.images_dir.join(stored_name))
    }

    /// Check the source exists and has a readable image header
    fn check_source(source: &Path) -> Result<()> {
        if !source.is_file() {
            return Err(Error::NotFound(format!("Image file: {}", source.display())));
        }
        image::image_dimensions(source)?;
        Ok(())
    }
}

impl CarStorage for FileCarStorage {
    fn store_json(&self, file: &Path, cars: &[Car]) -> Result<usize> {
        if let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let writer = BufWriter::new(File::create(file)?);
        serde_json::to_writer_pretty(writer, cars)?;
        tracing::info!(path = %file.display(), count = cars.len(), "exported cars to JSON");
        Ok(cars.len())
    }

    fn load_json(&self, file: &Path) -> Result<Vec<Car>> {
        if !file.exists() {
            return Err(Error::NotFound(format!("JSON file: {}", file.display())));
        }
        let reader = BufReader::new(File::open(file)?);
        let cars: Vec<Car> = serde_json::from_reader(reader)?;
        tracing::debug!(path = %file.display(), count = cars.len(), "loaded cars from JSON");
        Ok(cars)
    }

    fn save_image(&self, source: &Path) -> Result<String> {
        Self::check_source(source)?;

        let extension = source
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_else(|| "png".to_string());
        let stored_name = format!("{}.{}", Uuid::new_v4(), extension);

        fs::copy(source, self.images_dir.join(&stored_name))?;
        tracing::info!(source = %source.display(), stored = %stored_name, "stored image");
        Ok(stored_name)
    }

    fn update_image(&self, stored_name: &str, source: &Path) -> Result<()> {
        Self::check_source(source)?;
        let target = self.stored_path(stored_name)?;
        fs::copy(source, &target)?;
        tracing::info!(source = %source.display(), stored = %stored_name, "replaced image");
        Ok(())
    }

    fn delete_image(&self, stored_name: &str) -> Result<()> {
        let target = self.stored_path(stored_name)?;
        match fs::remove_file(&target) {
            Ok(()) => {
                tracing::info!(stored = %stored_name, "deleted image");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(stored = %stored_name, "image already gone");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn delete_all_images(&self) -> Result<usize> {
        let mut removed = 0;
        for entry in WalkDir::new(&self.images_dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(std::io::Error::from)?;
            if entry.file_type().is_file() {
                fs::remove_file(entry.path())?;
                removed += 1;
            }
        }
        tracing::info!(count = removed, "deleted all images");
        Ok(removed)
    }

    fn load_image(&self, stored_name: &str) -> Result<StoredImage> {
        let path = self.stored_path(stored_name)?;
        if !path.is_file() {
            return Err(Error::NotFound(format!("Stored image: {}", stored_name)));
        }
        // Content sniffing: update_image may have written another format under the old name
        let image = image::load_from_memory(&fs::read(&path)?)?;
        Ok(StoredImage { path, image })
    }

    fn export_zip(&self, file: &Path, cars: &[Car]) -> Result<()> {
        archive::write_archive(file, cars, &self.images_dir)
    }

    fn load_from_zip(&self, file: &Path) -> Result<Vec<Car>> {
        archive::read_archive(file, &self.images_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dealer_types::EngineType;
    use image::{Rgb, RgbImage};
    use tempfile::tempdir;

    fn write_png(path: &Path, color: [u8; 3]) {
        RgbImage::from_pixel(4, 3, Rgb(color)).save(path).unwrap();
    }

    #[test]
    fn test_save_load_and_delete_image() {
        let dir = tempdir().unwrap();
        let storage = FileCarStorage::open(dir.path().join("images")).unwrap();
        let source = dir.path().join("photo.PNG");
        write_png(&source, [255, 0, 0]);

        let name = storage.save_image(&source).unwrap();
        assert!(name.ends_with(".png"));

        let loaded = storage.load_image(&name).unwrap();
        assert_eq!(loaded.image.width(), 4);
        assert_eq!(loaded.path, storage.images_dir().join(&name));

        storage.delete_image(&name).unwrap();
        assert!(matches!(storage.load_image(&name), Err(Error::NotFound(_))));
        // Second delete is a no-op
        storage.delete_image(&name).unwrap();
    }

    #[test]
    fn test_update_image_overwrites_in_place() {
        let dir = tempdir().unwrap();
        let storage = FileCarStorage::open(dir.path().join("images")).unwrap();
        let red = dir.path().join("red.png");
        let blue = dir.path().join("blue.png");
        write_png(&red, [255, 0, 0]);
        write_png(&blue, [0, 0, 255]);

        let name = storage.save_image(&red).unwrap();
        storage.update_image(&name, &blue).unwrap();

        let pixel = storage.load_image(&name).unwrap().image.to_rgb8().get_pixel(0, 0).0;
        assert_eq!(pixel, [0, 0, 255]);
    }

    #[test]
    fn test_rejects_missing_or_non_image_source() {
        let dir = tempdir().unwrap();
        let storage = FileCarStorage::open(dir.path().join("images")).unwrap();

        let missing = dir.path().join("nope.png");
        assert!(matches!(storage.save_image(&missing), Err(Error::NotFound(_))));

        let text = dir.path().join("notes.png");
        fs::write(&text, "not a picture").unwrap();
        assert!(storage.save_image(&text).is_err());
    }

    #[test]
    fn test_stored_names_cannot_escape() {
        let dir = tempdir().unwrap();
        let storage = FileCarStorage::open(dir.path().join("images")).unwrap();
        assert!(storage.stored_path("../cars.json").is_err());
        assert!(storage.stored_path("").is_err());
        assert!(storage.stored_path("a.png").is_ok());
    }

    #[test]
    fn test_delete_all_images() {
        let dir = tempdir().unwrap();
        let storage = FileCarStorage::open(dir.path().join("images")).unwrap();
        let source = dir.path().join("p.png");
        write_png(&source, [1, 2, 3]);
        storage.save_image(&source).unwrap();
        storage.save_image(&source).unwrap();

        assert_eq!(storage.delete_all_images().unwrap(), 2);
        assert_eq!(storage.delete_all_images().unwrap(), 0);
    }

    #[test]
    fn test_json_round_trip() {
        let dir = tempdir().unwrap();
        let storage = FileCarStorage::open(dir.path().join("images")).unwrap();
        let date = NaiveDate::from_ymd_opt(2015, 7, 20).unwrap();
        let cars = vec![
            Car::new("A1", "Opel", "Corsa", EngineType::Gasoline, date).with_id(1),
            Car::new("B2", "Nissan", "Leaf", EngineType::Electric, date).with_id(2),
        ];
        let file = dir.path().join("out").join("cars.json");

        assert_eq!(storage.store_json(&file, &cars).unwrap(), 2);
        assert_eq!(storage.load_json(&file).unwrap(), cars);
        assert!(matches!(
            storage.load_json(&dir.path().join("missing.json")),
            Err(Error::NotFound(_))
        ));
    }
}
