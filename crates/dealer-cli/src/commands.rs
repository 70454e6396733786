//! Command handlers

use crate::cli::{Cli, Commands};
use crate::output::{output_cars, output_form};
use chrono::NaiveDate;
use dealer_app::config::Config;
use dealer_app::repository::{open_dealership, FileDealership};
use dealer_app::OperationMode;
use dealer_domain::CarForm;
use dealer_types::{Car, Error, OutputFormat, Result};
use std::path::PathBuf;

/// Field values supplied to `add` / `edit`
struct CarInput {
    plate: Option<String>,
    brand: Option<String>,
    model: Option<String>,
    engine: Option<String>,
    date: Option<NaiveDate>,
    image: Option<PathBuf>,
}

impl CarInput {
    /// Overlay the supplied fields onto a form
    fn apply(self, mut form: CarForm) -> CarForm {
        if let Some(plate) = self.plate {
            form.license_plate = plate;
        }
        if let Some(brand) = self.brand {
            form.brand = brand;
        }
        if let Some(model) = self.model {
            form.model = model;
        }
        if let Some(engine) = self.engine {
            form.engine_type = engine;
        }
        if self.date.is_some() {
            form.registration_date = self.date;
        }
        form.staged_image = self.image;
        form
    }
}

pub fn execute(cli: Cli) -> Result<()> {
    let mut config = Config::load()?;

    // Override from CLI args
    if let Some(ref dir) = cli.data_dir {
        config = config.with_data_dir(dir.clone());
    }
    let output_format = cli.format.unwrap_or(config.output_format);
    tracing::debug!(data_dir = ?config.data_dir, %output_format, "config loaded");

    match cli.command {
        Commands::List { engine, plate } => cmd_list(&config, output_format, &engine, &plate),

        Commands::Show { plate } => cmd_show(&config, output_format, &plate),

        Commands::Add {
            plate,
            brand,
            model,
            engine,
            date,
            image,
        } => cmd_add(
            &config,
            CarInput {
                plate: Some(plate),
                brand: Some(brand),
                model: Some(model),
                engine: Some(engine),
                date: Some(date),
                image,
            },
        ),

        Commands::Edit {
            plate,
            new_plate,
            brand,
            model,
            engine,
            date,
            image,
        } => cmd_edit(
            &config,
            &plate,
            CarInput {
                plate: new_plate,
                brand,
                model,
                engine,
                date,
                image,
            },
        ),

        Commands::Delete { plate } => cmd_delete(&config, &plate),

        Commands::ExportJson { file } => {
            let dealership = open_dealership(&config)?;
            let count = dealership.export_json(&file)?;
            println!("Exported {} car(s) to {}", count, file.display());
            Ok(())
        }

        Commands::ImportJson { file, with_images } => {
            let dealership = open_dealership(&config)?;
            let count = dealership.import_json(&file, with_images)?;
            println!("Imported {} car(s) from {}", count, file.display());
            if !with_images {
                println!("Stored pictures were removed; cars were imported without pictures");
            }
            Ok(())
        }

        Commands::ExportZip { file } => {
            let dealership = open_dealership(&config)?;
            dealership.export_zip(&file)?;
            println!(
                "Exported {} car(s) with pictures to {}",
                dealership.state().cars.len(),
                file.display()
            );
            Ok(())
        }

        Commands::ImportZip { file } => {
            let dealership = open_dealership(&config)?;
            let count = dealership.import_zip(&file)?;
            println!("Imported {} car(s) from {}", count, file.display());
            Ok(())
        }

        Commands::Config {
            show,
            set_data_dir,
            set_images_dir,
            set_output,
            reset,
        } => cmd_config(show, set_data_dir, set_images_dir, set_output, reset),
    }
}

fn cmd_list(config: &Config, output_format: OutputFormat, engine: &str, plate: &str) -> Result<()> {
    let dealership = open_dealership(config)?;
    let cars = dealership.filtered_cars(engine, plate);
    output_cars(output_format, &cars)
}

fn cmd_show(config: &Config, output_format: OutputFormat, plate: &str) -> Result<()> {
    let dealership = open_dealership(config)?;
    let car = find_car(&dealership, plate)?;
    dealership.select_car(&car);
    output_form(output_format, &dealership.state().selected)
}

fn cmd_add(config: &Config, input: CarInput) -> Result<()> {
    let dealership = open_dealership(config)?;
    dealership.set_operation_mode(OperationMode::Create);

    let form = input.apply(CarForm::empty());
    let car = dealership.create_car(&form)?;

    println!("Registered: {} ({} {})", car.license_plate, car.brand, car.model);
    if let Some(name) = car.image() {
        println!("  Picture: {}", name);
    }
    Ok(())
}

fn cmd_edit(config: &Config, plate: &str, input: CarInput) -> Result<()> {
    let dealership = open_dealership(config)?;
    let car = find_car(&dealership, plate)?;

    dealership.select_car(&car);
    dealership.set_operation_mode(OperationMode::Edit);

    let form = input.apply(dealership.state().selected.clone());
    let updated = dealership.edit_car(&form)?;

    println!(
        "Updated: {} ({} {})",
        updated.license_plate, updated.brand, updated.model
    );
    Ok(())
}

fn cmd_delete(config: &Config, plate: &str) -> Result<()> {
    let dealership = open_dealership(config)?;
    let car = find_car(&dealership, plate)?;

    dealership.select_car(&car);
    dealership.set_operation_mode(OperationMode::Edit);
    dealership.delete_selected()?;

    println!("Deleted: {}", car.license_plate);
    Ok(())
}

fn find_car(dealership: &FileDealership, plate: &str) -> Result<Car> {
    dealership
        .state()
        .car_by_plate(plate)
        .cloned()
        .ok_or_else(|| Error::NotFound(format!("car with plate {}", plate)))
}

fn cmd_config(
    show: bool,
    set_data_dir: Option<PathBuf>,
    set_images_dir: Option<PathBuf>,
    set_output: Option<OutputFormat>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(dir) = set_data_dir {
        config.data_dir = Some(dir);
        modified = true;
    }

    if let Some(dir) = set_images_dir {
        config.images_dir = Some(dir);
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
