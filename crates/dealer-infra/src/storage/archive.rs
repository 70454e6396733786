//! ZIP bundles of car records and their pictures
//!
//! Layout: `cars.json` at the root, pictures under `images/<stored name>`.

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use dealer_types::{Car, Error, Result};

const CARS_ENTRY: &str = "cars.json";
const IMAGES_PREFIX: &str = "images/";

/// Write `cars` and every picture they reference that exists in `images_dir`
pub fn write_archive(file: &Path, cars: &[Car], images_dir: &Path) -> Result<()> {
    if let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut zip = ZipWriter::new(File::create(file)?);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file(CARS_ENTRY, options)?;
    zip.write_all(&serde_json::to_vec_pretty(cars)?)?;

    let mut bundled = 0;
    for name in cars.iter().filter_map(Car::image) {
        let source = images_dir.join(name);
        if !source.is_file() {
            tracing::warn!(stored = %name, "image missing, not bundled");
            continue;
        }
        zip.start_file(format!("{}{}", IMAGES_PREFIX, name), options)?;
        io::copy(&mut File::open(&source)?, &mut zip)?;
        bundled += 1;
    }

    zip.finish()?;
    tracing::info!(path = %file.display(), cars = cars.len(), images = bundled, "exported ZIP archive");
    Ok(())
}

/// Read the cars of an archive, extracting its pictures into `images_dir`.
///
/// Picture entries are written by file name only; entries whose path would
/// leave the archive root are skipped.
pub fn read_archive(file: &Path, images_dir: &Path) -> Result<Vec<Car>> {
    if !file.exists() {
        return Err(Error::NotFound(format!("ZIP file: {}", file.display())));
    }
    let mut archive = ZipArchive::new(File::open(file)?)?;

    let cars: Vec<Car> = {
        let mut entry = archive.by_name(CARS_ENTRY).map_err(|e| match e {
            zip::result::ZipError::FileNotFound => {
                Error::Storage(format!("Archive has no {}: {}", CARS_ENTRY, file.display()))
            }
            other => other.into(),
        })?;
        let mut content = Vec::new();
        entry.read_to_end(&mut content)?;
        serde_json::from_slice(&content)?
    };

    fs::create_dir_all(images_dir)?;
    let mut extracted = 0;
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        if entry.is_dir() || !entry.name().starts_with(IMAGES_PREFIX) {
            continue;
        }

        let Some(file_name) = entry
            .enclosed_name()
            .and_then(|p| p.file_name().map(|f| f.to_owned()))
        else {
            tracing::warn!(entry = %entry.name(), "skipping unsafe archive entry");
            continue;
        };

        let mut dest = File::create(images_dir.join(file_name))?;
        io::copy(&mut entry, &mut dest)?;
        extracted += 1;
    }

    tracing::info!(path = %file.display(), cars = cars.len(), images = extracted, "loaded ZIP archive");
    Ok(cars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dealer_types::EngineType;
    use tempfile::tempdir;

    fn cars() -> Vec<Car> {
        let d = NaiveDate::from_ymd_opt(2010, 10, 10).unwrap();
        vec![
            Car::new("AAA1", "Volvo", "V40", EngineType::Diesel, d)
                .with_id(1)
                .with_image("one.png"),
            Car::new("BBB2", "Mini", "Cooper", EngineType::Gasoline, d).with_id(2),
            Car::new("CCC3", "BMW", "i3", EngineType::Electric, d)
                .with_id(3)
                .with_image("lost.png"),
        ]
    }

    #[test]
    fn test_archive_round_trip_with_images() {
        let dir = tempdir().unwrap();
        let source_images = dir.path().join("src_images");
        fs::create_dir_all(&source_images).unwrap();
        fs::write(source_images.join("one.png"), b"png-bytes").unwrap();

        let zip_path = dir.path().join("backup.zip");
        write_archive(&zip_path, &cars(), &source_images).unwrap();

        let target_images = dir.path().join("dst_images");
        let loaded = read_archive(&zip_path, &target_images).unwrap();

        assert_eq!(loaded, cars());
        assert_eq!(fs::read(target_images.join("one.png")).unwrap(), b"png-bytes");
        assert!(!target_images.join("lost.png").exists());
    }

    #[test]
    fn test_archive_without_cars_entry_is_rejected() {
        let dir = tempdir().unwrap();
        let zip_path = dir.path().join("empty.zip");
        let mut zip = ZipWriter::new(File::create(&zip_path).unwrap());
        zip.start_file("readme.txt", SimpleFileOptions::default()).unwrap();
        zip.write_all(b"hello").unwrap();
        zip.finish().unwrap();

        let result = read_archive(&zip_path, &dir.path().join("images"));
        assert!(matches!(result, Err(Error::Storage(_))));
    }

    #[test]
    fn test_unsafe_entries_are_not_extracted_outside() {
        let dir = tempdir().unwrap();
        let zip_path = dir.path().join("evil.zip");
        let mut zip = ZipWriter::new(File::create(&zip_path).unwrap());
        zip.start_file(CARS_ENTRY, SimpleFileOptions::default()).unwrap();
        zip.write_all(b"[]").unwrap();
        zip.start_file("images/../../escape.png", SimpleFileOptions::default()).unwrap();
        zip.write_all(b"x").unwrap();
        zip.finish().unwrap();

        let images = dir.path().join("images");
        let loaded = read_archive(&zip_path, &images).unwrap();
        assert!(loaded.is_empty());
        assert!(!dir.path().join("escape.png").exists());
    }
}
