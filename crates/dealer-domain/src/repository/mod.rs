//! Repository trait definitions for car persistence

use dealer_types::{Car, CarId, Error};

/// Repository for car records, keyed by numeric identity
pub trait CarRepository {
    /// Find all cars, sorted by license plate
    fn find_all(&self) -> Result<Vec<Car>, Error>;

    /// Find a car by exact license plate
    fn find_by_license_plate(&self, plate: &str) -> Result<Option<Car>, Error>;

    /// Insert a new car (assigning its id) or update an existing one
    fn save(&self, car: &Car) -> Result<Car, Error>;

    /// Save several cars, returning them with their ids
    fn save_all(&self, cars: &[Car]) -> Result<Vec<Car>, Error>;

    /// Delete a car by id; deleting an unknown id is not an error
    fn delete_by_id(&self, id: CarId) -> Result<(), Error>;

    /// Remove every car
    fn delete_all(&self) -> Result<(), Error>;
}
