//! CLI definition using clap

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use dealer_types::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dealer")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "Car dealership inventory manager")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory override; pictures are read from `<dir>/images`
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List cars, optionally filtered
    List {
        /// Engine type filter (ALL, GASOLINE, DIESEL, ELECTRIC, HYBRID)
        #[arg(long, short = 'e', default_value = "ALL")]
        engine: String,

        /// Case-insensitive license plate substring
        #[arg(long, short = 'p', default_value = "")]
        plate: String,
    },

    /// Show one car with its picture details
    Show {
        /// License plate
        plate: String,
    },

    /// Register a new car
    Add {
        /// License plate (e.g., "1234ABC")
        #[arg(long)]
        plate: String,

        #[arg(long)]
        brand: String,

        #[arg(long)]
        model: String,

        /// Engine type (GASOLINE, DIESEL, ELECTRIC, HYBRID)
        #[arg(long)]
        engine: String,

        /// Registration date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,

        /// Picture to store with the car
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Edit an existing car
    Edit {
        /// Current license plate
        plate: String,

        /// New license plate
        #[arg(long)]
        new_plate: Option<String>,

        #[arg(long)]
        brand: Option<String>,

        #[arg(long)]
        model: Option<String>,

        #[arg(long)]
        engine: Option<String>,

        /// Registration date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// New picture (replaces the current one)
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Delete a car and its picture
    Delete {
        /// License plate
        plate: String,
    },

    /// Export the car list to JSON
    ExportJson {
        /// Output JSON file
        file: PathBuf,
    },

    /// Replace all cars with the contents of a JSON file
    ImportJson {
        /// Input JSON file
        file: PathBuf,

        /// Keep ids and picture references from the file
        #[arg(long)]
        with_images: bool,
    },

    /// Export cars and pictures to a ZIP archive
    ExportZip {
        /// Output ZIP file
        file: PathBuf,
    },

    /// Replace all cars with the contents of a ZIP archive
    ImportZip {
        /// Input ZIP file
        file: PathBuf,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set data directory
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// Set pictures directory
        #[arg(long)]
        set_images_dir: Option<PathBuf>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}
