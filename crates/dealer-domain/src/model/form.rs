//! Editing buffer for a single car

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use image::DynamicImage;

use dealer_types::{Car, CarId, EngineType, ValidationError};

/// What the edit/detail view shows for one car.
///
/// Never mutated in place once published; transitions build a new form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarForm {
    pub id: Option<CarId>,
    pub license_plate: String,
    pub brand: String,
    pub model: String,
    /// Engine type name as typed or picked ("DIESEL", ...)
    pub engine_type: String,
    pub registration_date: Option<NaiveDate>,
    /// Decoded picture for display
    pub image: Option<Arc<DynamicImage>>,
    /// Stored file name of the selected car's picture, `None` for the placeholder
    pub stored_image: Option<String>,
    /// Source file picked by the user, copied into storage on save
    pub staged_image: Option<PathBuf>,
}

impl CarForm {
    /// Blank form for creating a new car
    pub fn empty() -> Self {
        Self::default()
    }

    /// Form showing a persisted car and its loaded picture
    pub fn from_car(car: &Car, image: Arc<DynamicImage>, stored_image: Option<String>) -> Self {
        Self {
            id: car.id,
            license_plate: car.license_plate.clone(),
            brand: car.brand.clone(),
            model: car.model.clone(),
            engine_type: car.engine_type.name().to_string(),
            registration_date: Some(car.registration_date),
            image: Some(image),
            stored_image,
            staged_image: None,
        }
    }

    pub fn with_staged_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.staged_image = Some(path.into());
        self
    }

    /// Convert to a car entity.
    ///
    /// Fails only when the form cannot represent a car at all (unknown engine
    /// type, missing date); field rules are checked by the validator.
    pub fn to_car(&self) -> Result<Car, ValidationError> {
        let engine_type: EngineType = self.engine_type.parse()?;
        let registration_date = self
            .registration_date
            .ok_or(ValidationError::MissingRegistrationDate)?;

        Ok(Car {
            id: self.id,
            license_plate: self.license_plate.clone(),
            brand: self.brand.clone(),
            model: self.model.clone(),
            engine_type,
            registration_date,
            image_file_name: self.stored_image.clone(),
        })
    }

    pub fn has_stored_image(&self) -> bool {
        self.stored_image.as_deref().is_some_and(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2019, 6, 1).unwrap()
    }

    #[test]
    fn test_round_trip_through_form() {
        let car = Car::new("4321XYZ", "Tesla", "Model 3", EngineType::Electric, date())
            .with_id(3)
            .with_image("abc.png");
        let form = CarForm::from_car(&car, Arc::new(crate::placeholder_image()), car.image_file_name.clone());

        assert_eq!(form.engine_type, "ELECTRIC");
        assert_eq!(form.to_car().unwrap(), car);
    }

    #[test]
    fn test_unknown_engine_is_rejected() {
        let form = CarForm {
            license_plate: "1".into(),
            engine_type: "STEAM".into(),
            registration_date: Some(date()),
            ..CarForm::empty()
        };
        assert_eq!(
            form.to_car(),
            Err(ValidationError::UnknownEngineType("STEAM".into()))
        );
    }

    #[test]
    fn test_missing_date_is_rejected() {
        let form = CarForm {
            engine_type: "diesel".into(),
            ..CarForm::empty()
        };
        assert_eq!(form.to_car(), Err(ValidationError::MissingRegistrationDate));
    }
}
