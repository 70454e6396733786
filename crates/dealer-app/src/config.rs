//! Configuration management for the dealership manager
//!
//! Config stored at: ~/.config/car-dealer/config.json

use dealer_types::{ConfigError, OutputFormat, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "car-dealer";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the car records (cars.json)
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Directory holding stored car pictures
    #[serde(default)]
    pub images_dir: Option<PathBuf>,

    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            images_dir: None,
            output_format: default_output_format(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join(APP_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Get the data directory path
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.data_dir {
            return Ok(dir.clone());
        }

        let data_dir = dirs::data_dir()
            .ok_or(ConfigError::NotFound)?
            .join(APP_DIR);
        Ok(data_dir)
    }

    /// Get the images directory path (defaults to `<data_dir>/images`)
    pub fn images_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.images_dir {
            return Ok(dir.clone());
        }
        Ok(self.data_dir()?.join("images"))
    }

    /// Point at another data directory; pictures follow it to `<dir>/images`
    pub fn with_data_dir(self, dir: PathBuf) -> Self {
        Self {
            data_dir: Some(dir),
            images_dir: None,
            ..self
        }
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from a specific file, defaulting when it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save config to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Car Dealer Configuration")?;
        writeln!(f, "========================")?;
        writeln!(f)?;
        writeln!(
            f,
            "Data dir:       {}",
            self.data_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;
        writeln!(
            f,
            "Images dir:     {}",
            self.images_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;
        writeln!(f, "Output format:  {}", self.output_format)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:    {}", path.display())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_images_dir_follows_data_dir() {
        let config = Config {
            data_dir: Some(PathBuf::from("/srv/lot")),
            ..Config::default()
        };
        assert_eq!(config.images_dir().unwrap(), PathBuf::from("/srv/lot/images"));

        let config = Config {
            images_dir: Some(PathBuf::from("/pics")),
            ..config
        };
        assert_eq!(config.images_dir().unwrap(), PathBuf::from("/pics"));
    }

    #[test]
    fn test_data_dir_override_moves_images_too() {
        let config = Config {
            images_dir: Some(PathBuf::from("/pics")),
            ..Config::default()
        }
        .with_data_dir(PathBuf::from("/tmp/lot"));

        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/tmp/lot"));
        assert_eq!(config.images_dir().unwrap(), PathBuf::from("/tmp/lot/images"));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        assert_eq!(Config::load_from(&path).unwrap(), Config::default());

        let config = Config {
            data_dir: Some(dir.path().to_path_buf()),
            images_dir: None,
            output_format: OutputFormat::Json,
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{}").unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());

        std::fs::write(&path, "not json").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
