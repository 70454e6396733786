//! List filtering by engine type and plate

use dealer_types::{Car, EngineType};

/// Engine filter value that matches every car
pub const ENGINE_FILTER_ALL: &str = "ALL";

/// Values offered for the engine filter: "ALL" followed by every engine type
pub fn engine_filter_options() -> Vec<String> {
    std::iter::once(ENGINE_FILTER_ALL.to_string())
        .chain(EngineType::names())
        .collect()
}

/// Cars matching both the engine filter and the plate substring.
///
/// The engine filter is tolerant: "ALL" and any value that does not name an
/// engine type match everything. The plate match is a case-insensitive
/// substring test, spaces included; an empty substring matches every plate.
pub fn filter_cars(cars: &[Car], engine_filter: &str, plate_substring: &str) -> Vec<Car> {
    let engine: Option<EngineType> = engine_filter.parse().ok();
    let needle = plate_substring.to_lowercase();

    cars.iter()
        .filter(|car| engine.map_or(true, |e| car.engine_type == e))
        .filter(|car| car.license_plate.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn cars() -> Vec<Car> {
        let d = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        vec![
            Car::new("A", "Seat", "Leon", EngineType::Diesel, d).with_id(1),
            Car::new("B", "Fiat", "500", EngineType::Gasoline, d).with_id(2),
            Car::new("BA-2", "Audi", "A4", EngineType::Diesel, d).with_id(3),
        ]
    }

    fn plates(cars: &[Car]) -> Vec<&str> {
        cars.iter().map(|c| c.license_plate.as_str()).collect()
    }

    #[test]
    fn test_all_with_plate_substring() {
        let list = cars();
        assert_eq!(plates(&filter_cars(&list[..2], "ALL", "A")), vec!["A"]);
        assert_eq!(plates(&filter_cars(&list, "ALL", "a")), vec!["A", "BA-2"]);
    }

    #[test]
    fn test_engine_only() {
        let list = cars();
        assert_eq!(plates(&filter_cars(&list, "DIESEL", "")), vec!["A", "BA-2"]);
        assert!(filter_cars(&list, "ELECTRIC", "").is_empty());
    }

    #[test]
    fn test_plate_substring_keeps_spaces() {
        let d = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let list = vec![
            Car::new("AB C1", "Seat", "Leon", EngineType::Diesel, d),
            Car::new("ABC2", "Seat", "Leon", EngineType::Diesel, d),
        ];
        assert_eq!(plates(&filter_cars(&list, "ALL", " c")), vec!["AB C1"]);
        assert_eq!(plates(&filter_cars(&list, "ALL", "c")), vec!["AB C1", "ABC2"]);
    }

    #[test]
    fn test_unknown_engine_filter_passes_through() {
        let list = cars();
        for filter in ["", "STEAM", "any", "ALLX"] {
            assert_eq!(filter_cars(&list, filter, "").len(), list.len(), "filter {filter:?}");
        }
    }

    #[test]
    fn test_filter_options() {
        assert_eq!(
            engine_filter_options(),
            vec!["ALL", "GASOLINE", "DIESEL", "ELECTRIC", "HYBRID"]
        );
    }
}
