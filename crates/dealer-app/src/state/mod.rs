//! UI-facing state
//!
//! `State` is an immutable snapshot; every transition builds a new one and
//! hands it to the `StateStore`, which swaps it in and notifies observers.

mod store;

pub use store::{StateStore, SubscriptionId};

use dealer_domain::CarForm;
use dealer_types::{Car, CarId, EngineType};

/// What a save of the selected form means
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OperationMode {
    #[default]
    Create,
    Edit,
}

impl std::fmt::Display for OperationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationMode::Create => write!(f, "create"),
            OperationMode::Edit => write!(f, "edit"),
        }
    }
}

/// Snapshot of everything the dealership views display
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    /// Known cars, sorted by license plate
    pub cars: Vec<Car>,
    /// Names of the selectable engine types
    pub engine_types: Vec<String>,
    /// Car shown in the detail/edit form
    pub selected: CarForm,
    pub mode: OperationMode,
}

impl State {
    pub fn new(cars: Vec<Car>) -> Self {
        Self {
            cars: sorted_by_plate(cars),
            engine_types: EngineType::names(),
            selected: CarForm::empty(),
            mode: OperationMode::default(),
        }
    }

    /// Copy with the car list replaced (and re-sorted)
    pub fn with_cars(&self, cars: Vec<Car>) -> Self {
        Self {
            cars: sorted_by_plate(cars),
            ..self.clone()
        }
    }

    /// Copy with one car added, or replacing the car with the same id
    pub fn with_car(&self, car: Car) -> Self {
        let mut cars: Vec<Car> = self
            .cars
            .iter()
            .filter(|c| car.id.is_none() || c.id != car.id)
            .cloned()
            .collect();
        cars.push(car);
        self.with_cars(cars)
    }

    /// Copy without the car of the given id
    pub fn without_car(&self, id: CarId) -> Self {
        let cars = self.cars.iter().filter(|c| c.id != Some(id)).cloned().collect();
        self.with_cars(cars)
    }

    pub fn with_selected(&self, selected: CarForm) -> Self {
        Self {
            selected,
            ..self.clone()
        }
    }

    pub fn with_mode(&self, mode: OperationMode) -> Self {
        Self {
            mode,
            ..self.clone()
        }
    }

    pub fn car_by_id(&self, id: CarId) -> Option<&Car> {
        self.cars.iter().find(|c| c.id == Some(id))
    }

    pub fn car_by_plate(&self, plate: &str) -> Option<&Car> {
        self.cars
            .iter()
            .find(|c| c.license_plate.eq_ignore_ascii_case(plate.trim()))
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

fn sorted_by_plate(mut cars: Vec<Car>) -> Vec<Car> {
    cars.sort_by(|a, b| a.license_plate.cmp(&b.license_plate));
    cars
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn car(id: CarId, plate: &str) -> Car {
        Car::new(
            plate,
            "Ford",
            "Focus",
            EngineType::Diesel,
            NaiveDate::from_ymd_opt(2017, 4, 4).unwrap(),
        )
        .with_id(id)
    }

    fn plates(state: &State) -> Vec<&str> {
        state.cars.iter().map(|c| c.license_plate.as_str()).collect()
    }

    #[test]
    fn test_new_state_is_sorted() {
        let state = State::new(vec![car(1, "C"), car(2, "A"), car(3, "B")]);
        assert_eq!(plates(&state), vec!["A", "B", "C"]);
        assert_eq!(state.engine_types.len(), 4);
        assert_eq!(state.mode, OperationMode::Create);
    }

    #[test]
    fn test_with_car_replaces_same_id() {
        let state = State::new(vec![car(1, "A"), car(2, "B")]);
        let next = state.with_car(car(1, "Z"));
        assert_eq!(plates(&next), vec!["B", "Z"]);
        // Original snapshot untouched
        assert_eq!(plates(&state), vec!["A", "B"]);
    }

    #[test]
    fn test_without_car() {
        let state = State::new(vec![car(1, "A"), car(2, "B")]);
        assert_eq!(plates(&state.without_car(1)), vec!["B"]);
        assert_eq!(state.without_car(9).cars.len(), 2);
    }
}
