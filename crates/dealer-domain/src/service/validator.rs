//! Business validation for car records

use chrono::{Local, NaiveDate};

use dealer_types::{Car, ValidationError, MAX_PLATE_LEN};

/// Longest accepted brand or model name
pub const MAX_NAME_LEN: usize = 50;

/// Validate a car against today's date, returning the normalized record
pub fn validate_car(car: &Car) -> Result<Car, ValidationError> {
    validate_car_on(car, Local::now().date_naive())
}

/// Validate a car, returning a copy with trimmed fields and an upper-cased plate
pub fn validate_car_on(car: &Car, today: NaiveDate) -> Result<Car, ValidationError> {
    let license_plate = normalize_plate(&car.license_plate)?;
    let brand = required_name("Brand", &car.brand)?;
    let model = required_name("Model", &car.model)?;
    check_registration_date(car.registration_date, today)?;

    Ok(Car {
        license_plate,
        brand,
        model,
        ..car.clone()
    })
}

fn normalize_plate(plate: &str) -> Result<String, ValidationError> {
    let plate = plate.trim();
    if plate.is_empty() {
        return Err(ValidationError::MissingPlate);
    }
    if plate.chars().count() > MAX_PLATE_LEN {
        return Err(ValidationError::PlateTooLong(plate.to_string()));
    }
    let valid = plate
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == ' ' || c == '-');
    if !valid {
        return Err(ValidationError::InvalidPlate(plate.to_string()));
    }
    Ok(plate.to_ascii_uppercase())
}

fn required_name(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    if value.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::FieldTooLong {
            field,
            max: MAX_NAME_LEN,
        });
    }
    Ok(value.to_string())
}

fn check_registration_date(date: NaiveDate, today: NaiveDate) -> Result<(), ValidationError> {
    let earliest = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN);
    if date < earliest || date > today {
        return Err(ValidationError::RegistrationDateOutOfRange(date));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealer_types::EngineType;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn car(plate: &str) -> Car {
        Car::new(
            plate,
            " Renault ",
            "Clio",
            EngineType::Gasoline,
            NaiveDate::from_ymd_opt(2018, 2, 2).unwrap(),
        )
    }

    #[test]
    fn test_valid_car_is_normalized() {
        let valid = validate_car_on(&car(" 1234-abc "), today()).unwrap();
        assert_eq!(valid.license_plate, "1234-ABC");
        assert_eq!(valid.brand, "Renault");
    }

    #[test]
    fn test_plate_rules() {
        assert_eq!(
            validate_car_on(&car("   "), today()),
            Err(ValidationError::MissingPlate)
        );
        assert!(matches!(
            validate_car_on(&car("ABCDEFGHIJK"), today()),
            Err(ValidationError::PlateTooLong(_))
        ));
        assert!(matches!(
            validate_car_on(&car("12#4"), today()),
            Err(ValidationError::InvalidPlate(_))
        ));
    }

    #[test]
    fn test_blank_model_is_rejected() {
        let mut c = car("1");
        c.model = String::new();
        assert_eq!(
            validate_car_on(&c, today()),
            Err(ValidationError::MissingField("Model"))
        );
    }

    #[test]
    fn test_future_registration_is_rejected() {
        let mut c = car("1");
        c.registration_date = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        assert!(matches!(
            validate_car_on(&c, today()),
            Err(ValidationError::RegistrationDateOutOfRange(_))
        ));

        c.registration_date = today();
        assert!(validate_car_on(&c, today()).is_ok());
    }
}
