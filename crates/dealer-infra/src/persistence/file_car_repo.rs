//! File-based car repository implementation

use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use dealer_domain::CarRepository;
use dealer_types::{Car, CarId, Error, Result};

/// File-based implementation of CarRepository
///
/// Stores cars in a JSON file on disk, rewritten after every change.
pub struct FileCarRepository {
    store_path: PathBuf,
    cars: RefCell<BTreeMap<CarId, Car>>,
}

impl FileCarRepository {
    /// Create or load a car repository
    pub fn open(store_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&store_dir)?;
        let store_path = store_dir.join("cars.json");

        let cars = if store_path.exists() {
            let file = File::open(&store_path)?;
            let reader = BufReader::new(file);
            let list: Vec<Car> = serde_json::from_reader(reader)?;
            list.into_iter()
                .filter_map(|car| car.id.map(|id| (id, car)))
                .collect()
        } else {
            BTreeMap::new()
        };

        tracing::debug!(path = %store_path.display(), count = cars.len(), "opened car repository");

        Ok(Self {
            store_path,
            cars: RefCell::new(cars),
        })
    }

    /// Path of the backing JSON file
    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    /// Get total car count
    pub fn count(&self) -> usize {
        self.cars.borrow().len()
    }

    /// Save store to disk
    fn persist(&self) -> Result<()> {
        let file = File::create(&self.store_path)?;
        let writer = BufWriter::new(file);
        let cars = self.cars.borrow();
        let list: Vec<&Car> = cars.values().collect();
        serde_json::to_writer_pretty(writer, &list)?;
        Ok(())
    }

    fn next_id(cars: &BTreeMap<CarId, Car>) -> CarId {
        cars.keys().next_back().map_or(1, |last| last + 1)
    }

    /// Insert or update without persisting
    fn upsert(cars: &mut BTreeMap<CarId, Car>, car: &Car) -> Car {
        let id = car.id.unwrap_or_else(|| Self::next_id(cars));
        let saved = Car {
            id: Some(id),
            ..car.clone()
        };
        cars.insert(id, saved.clone());
        saved
    }
}

impl CarRepository for FileCarRepository {
    fn find_all(&self) -> std::result::Result<Vec<Car>, Error> {
        let mut cars: Vec<_> = self.cars.borrow().values().cloned().collect();
        cars.sort_by(|a, b| a.license_plate.cmp(&b.license_plate));
        Ok(cars)
    }

    fn find_by_license_plate(&self, plate: &str) -> std::result::Result<Option<Car>, Error> {
        let result = self
            .cars
            .borrow()
            .values()
            .find(|c| c.license_plate == plate)
            .cloned();
        Ok(result)
    }

    fn save(&self, car: &Car) -> std::result::Result<Car, Error> {
        let saved = Self::upsert(&mut self.cars.borrow_mut(), car);
        self.persist()?;
        tracing::info!(id = ?saved.id, plate = %saved.license_plate, "saved car");
        Ok(saved)
    }

    /// Cars carrying an id are stored first; the others get fresh ids above
    /// every id in the batch. Returned in input order.
    fn save_all(&self, cars: &[Car]) -> std::result::Result<Vec<Car>, Error> {
        let mut ids = HashSet::new();
        if let Some(id) = cars.iter().filter_map(|c| c.id).find(|id| !ids.insert(*id)) {
            return Err(Error::DuplicateId(id));
        }

        let saved: Vec<Car> = {
            let mut stored = self.cars.borrow_mut();
            let mut saved: Vec<Option<Car>> = vec![None; cars.len()];
            for (slot, car) in saved.iter_mut().zip(cars).filter(|(_, c)| c.id.is_some()) {
                *slot = Some(Self::upsert(&mut stored, car));
            }
            for (slot, car) in saved.iter_mut().zip(cars).filter(|(_, c)| c.id.is_none()) {
                *slot = Some(Self::upsert(&mut stored, car));
            }
            saved.into_iter().flatten().collect()
        };
        self.persist()?;
        tracing::info!(count = saved.len(), "saved cars");
        Ok(saved)
    }

    fn delete_by_id(&self, id: CarId) -> std::result::Result<(), Error> {
        let removed = self.cars.borrow_mut().remove(&id).is_some();
        if removed {
            self.persist()?;
            tracing::info!(id, "deleted car");
        }
        Ok(())
    }

    fn delete_all(&self) -> std::result::Result<(), Error> {
        self.cars.borrow_mut().clear();
        self.persist()?;
        tracing::info!("deleted all cars");
        Ok(())
    }
}
