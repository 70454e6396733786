//! Dealership Service - use cases behind the car management views
//!
//! Every intent (create, edit, delete, select, filter, import, export) goes
//! through this service. It validates input, drives the repository and the
//! storage, and publishes a new `State` snapshot when something changed.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use dealer_domain::service::{engine_filter_options, filter_cars, validate_car};
use dealer_domain::{placeholder_image, CarForm, CarRepository, CarStorage};
use dealer_types::{Car, Error, Result, ValidationError};

use crate::state::{OperationMode, State, StateStore, SubscriptionId};

/// Orchestrates car records between repository, storage, and state
pub struct DealershipService<R, S> {
    repo: R,
    storage: S,
    store: StateStore,
}

impl<R: CarRepository, S: CarStorage> DealershipService<R, S> {
    /// Load every car from the repository into a fresh state
    pub fn new(repo: R, storage: S) -> Result<Self> {
        let cars = repo.find_all()?;
        tracing::info!(count = cars.len(), "dealership loaded");
        Ok(Self {
            repo,
            storage,
            store: StateStore::new(State::new(cars)),
        })
    }

    pub fn state(&self) -> Arc<State> {
        self.store.get()
    }

    pub fn subscribe(&self, observer: impl Fn(&State) + 'static) -> SubscriptionId {
        self.store.subscribe(observer)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Values to offer in the engine filter ("ALL" first)
    pub fn engine_filter_options(&self) -> Vec<String> {
        engine_filter_options()
    }

    /// Cars of the current snapshot matching the engine filter and plate substring
    pub fn filtered_cars(&self, engine_filter: &str, plate_substring: &str) -> Vec<Car> {
        filter_cars(&self.store.get().cars, engine_filter, plate_substring)
    }

    /// Persist a new car from the form.
    ///
    /// A staged picture is copied into storage before the plate check, so a
    /// duplicate plate leaves that copy behind.
    pub fn create_car(&self, form: &CarForm) -> Result<Car> {
        let car = Car {
            id: None,
            image_file_name: None,
            ..form.to_car()?
        };
        let mut car = validate_car(&car)?;

        if let Some(ref source) = form.staged_image {
            car.image_file_name = Some(self.storage.save_image(source)?);
        }

        if self.repo.find_by_license_plate(&car.license_plate)?.is_some() {
            tracing::warn!(plate = %car.license_plate, "create rejected, plate exists");
            return Err(Error::PlateExists(car.license_plate));
        }

        let saved = self.repo.save(&car)?;
        self.store.update(|s| s.with_car(saved.clone()));
        tracing::info!(id = ?saved.id, plate = %saved.license_plate, "car created");
        Ok(saved)
    }

    /// Persist edits to the selected car.
    ///
    /// The car keeps the selected form's stored picture unless a new one is
    /// staged, which either becomes its first picture or overwrites the old
    /// file in place.
    pub fn edit_car(&self, form: &CarForm) -> Result<Car> {
        let selected = self.store.get().selected.clone();
        let id = form.id.ok_or(ValidationError::MissingId)?;
        if selected.id != Some(id) {
            return Err(Error::NoSelection);
        }

        let car = Car {
            image_file_name: selected.stored_image.clone(),
            ..form.to_car()?
        };
        let mut car = validate_car(&car)?;

        if let Some(ref source) = form.staged_image {
            match car.image() {
                None => car.image_file_name = Some(self.storage.save_image(source)?),
                Some(name) => self.storage.update_image(name, source)?,
            }
        }

        if let Some(owner) = self.repo.find_by_license_plate(&car.license_plate)? {
            if owner.id != Some(id) {
                tracing::warn!(plate = %car.license_plate, id, "edit rejected, plate exists");
                return Err(Error::PlateExists(car.license_plate));
            }
        }

        let saved = self.repo.save(&car)?;
        self.store.update(|s| s.with_car(saved.clone()));
        tracing::info!(id, plate = %saved.license_plate, "car updated");
        Ok(saved)
    }

    /// Delete the selected car and its stored picture
    pub fn delete_selected(&self) -> Result<()> {
        // Own copy, so a selection change mid-way cannot mix two cars
        let selected = self.store.get().selected.clone();
        let id = selected.id.ok_or(Error::NoSelection)?;

        if let Some(name) = selected.stored_image.as_deref().filter(|n| !n.is_empty()) {
            if let Err(e) = self.storage.delete_image(name) {
                tracing::warn!(stored = %name, error = %e, "image not removed, deleting car anyway");
            }
        }
        self.repo.delete_by_id(id)?;

        self.store.update(|s| s.without_car(id));
        tracing::info!(id, plate = %selected.license_plate, "car deleted");
        Ok(())
    }

    /// Show a car in the form, loading its picture (placeholder on any failure)
    pub fn select_car(&self, car: &Car) {
        let (image, stored_image) = match car.image() {
            Some(name) => match self.storage.load_image(name) {
                Ok(stored) => (stored.image, Some(name.to_string())),
                Err(e) => {
                    tracing::warn!(stored = %name, error = %e, "image unavailable, using placeholder");
                    (placeholder_image(), None)
                }
            },
            None => (placeholder_image(), None),
        };

        let form = CarForm::from_car(car, Arc::new(image), stored_image);
        self.store.update(|s| s.with_selected(form));
    }

    /// Reset the form to a blank create form
    pub fn clear_selection(&self) {
        self.store.update(|s| s.with_selected(CarForm::empty()));
    }

    pub fn set_operation_mode(&self, mode: OperationMode) {
        self.store.update(|s| s.with_mode(mode));
    }

    /// Reload the car list from the repository
    pub fn refresh(&self) -> Result<()> {
        let cars = self.repo.find_all()?;
        self.store.update(|s| s.with_cars(cars));
        Ok(())
    }

    /// Write the in-memory car list to a JSON file
    pub fn export_json(&self, file: &Path) -> Result<usize> {
        self.storage.store_json(file, &self.store.get().cars)
    }

    /// Replace every car with the contents of a JSON file.
    ///
    /// Once the file has been read and validated, stored pictures are removed.
    /// Without `with_images` the loaded cars lose their ids and picture
    /// references.
    pub fn import_json(&self, file: &Path, with_images: bool) -> Result<usize> {
        let loaded = self.storage.load_json(file)?;
        let cars: Vec<Car> = if with_images {
            loaded
        } else {
            loaded.iter().map(Car::stripped).collect()
        };
        let cars = prepare_import(&cars)?;

        self.storage.delete_all_images()?;
        let count = self.replace_all(&cars)?;
        tracing::info!(path = %file.display(), count, with_images, "imported JSON");
        Ok(count)
    }

    /// Bundle every persisted car and its picture into a ZIP archive
    pub fn export_zip(&self, file: &Path) -> Result<()> {
        let cars = self.repo.find_all()?;
        self.storage.export_zip(file, &cars)
    }

    /// Replace every car with the contents of a ZIP archive, assigning new ids
    pub fn import_zip(&self, file: &Path) -> Result<usize> {
        let cars: Vec<Car> = self
            .storage
            .load_from_zip(file)?
            .into_iter()
            .map(|car| Car { id: None, ..car })
            .collect();
        let cars = prepare_import(&cars)?;

        let count = self.replace_all(&cars)?;
        tracing::info!(path = %file.display(), count, "imported ZIP");
        Ok(count)
    }

    /// Wipe the repository, save `cars`, and re-sync the state.
    /// Returns how many cars the repository stored.
    fn replace_all(&self, cars: &[Car]) -> Result<usize> {
        self.repo.delete_all()?;
        let saved = self.repo.save_all(cars)?;
        self.refresh()?;
        Ok(saved.len())
    }
}

/// Validate and normalize imported cars, as create does, before anything is wiped
fn prepare_import(cars: &[Car]) -> Result<Vec<Car>> {
    let cars = cars
        .iter()
        .map(validate_car)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    ensure_unique(&cars)?;
    Ok(cars)
}

/// Imported data must not repeat a plate or an id
fn ensure_unique(cars: &[Car]) -> Result<()> {
    let mut plates = HashSet::new();
    let mut ids = HashSet::new();
    for car in cars {
        if !plates.insert(car.license_plate.as_str()) {
            return Err(Error::PlateExists(car.license_plate.clone()));
        }
        if let Some(id) = car.id {
            if !ids.insert(id) {
                return Err(Error::DuplicateId(id));
            }
        }
    }
    Ok(())
}
