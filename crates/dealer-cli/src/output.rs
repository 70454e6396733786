//! Output formatting module

use dealer_domain::CarForm;
use dealer_types::{Car, OutputFormat, Result};

pub fn output_cars(output_format: OutputFormat, cars: &[Car]) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(cars)?);
        return Ok(());
    }

    if cars.is_empty() {
        println!("No cars found.");
        return Ok(());
    }

    println!(
        "{:<5} {:<12} {:<14} {:<16} {:<9} {:<11} {}",
        "ID", "Plate", "Brand", "Model", "Engine", "Registered", "Image"
    );
    println!("{}", "-".repeat(80));
    for car in cars {
        println!(
            "{:<5} {:<12} {:<14} {:<16} {:<9} {:<11} {}",
            car.id.map(|id| id.to_string()).unwrap_or_else(|| "-".into()),
            car.license_plate,
            truncate(&car.brand, 14),
            truncate(&car.model, 16),
            car.engine_type,
            car.registration_date,
            car.image().unwrap_or("-")
        );
    }
    println!("\n{} car(s)", cars.len());
    Ok(())
}

pub fn output_car(output_format: OutputFormat, car: &Car) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(car)?);
    } else {
        println!("Plate:       {}", car.license_plate);
        println!("Brand:       {}", car.brand);
        println!("Model:       {}", car.model);
        println!("Engine:      {}", car.engine_type);
        println!("Registered:  {}", car.registration_date);
    }
    Ok(())
}

/// Detail view of the selected form, including its picture
pub fn output_form(output_format: OutputFormat, form: &CarForm) -> Result<()> {
    let car = form.to_car()?;
    output_car(output_format, &car)?;

    if output_format == OutputFormat::Table {
        if let Some(id) = form.id {
            println!("ID:          {}", id);
        }
        let picture = match (&form.image, form.has_stored_image()) {
            (Some(img), true) => format!(
                "{} ({}x{})",
                form.stored_image.as_deref().unwrap_or_default(),
                img.width(),
                img.height()
            ),
            (Some(img), false) => format!("(placeholder {}x{})", img.width(), img.height()),
            (None, _) => "(none)".to_string(),
        };
        println!("Picture:     {}", picture);
    }
    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
