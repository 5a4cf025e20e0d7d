//! Configuration management and validation.
//!
//! Settings are layered: built-in defaults, then an optional TOML file,
//! then environment variables, then command-line overrides applied by the
//! CLI.

use crate::constants::{
    APP_DIR_NAME, CONFIG_FILE_NAME, DATA_DIR_ENV, DEFAULT_DATA_DIR, DEFAULT_PAGE_SIZE,
};
use crate::error::{BikeshareError, Result};
use crate::models::City;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Global configuration for the bikeshare explorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the city CSV files
    pub data_dir: PathBuf,

    /// Raw records shown per page
    pub page_size: usize,

    /// Per-city file name overrides, keyed by city key (e.g. "new york city")
    pub datasets: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            page_size: DEFAULT_PAGE_SIZE,
            datasets: BTreeMap::new(),
        }
    }
}

/// `./data` when present, else the per-user data directory if it exists
fn default_data_dir() -> PathBuf {
    let local = PathBuf::from(DEFAULT_DATA_DIR);
    if local.is_dir() {
        return local;
    }

    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .filter(|dir| dir.is_dir())
        .unwrap_or(local)
}

impl Config {
    /// Default configuration file location, e.g. `~/.config/bikeshare/config.toml`
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Parse a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            BikeshareError::configuration(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml(&contents).map_err(|e| match e {
            BikeshareError::Configuration { message } => BikeshareError::configuration(format!(
                "{} in '{}'",
                message,
                path.display()
            )),
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| BikeshareError::configuration(format!("Invalid config: {}", e)))
    }

    /// Load defaults, then the config file (explicit or default location), then env
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => {
                debug!("Loading config file: {}", path.display());
                Self::from_file(path)?
            }
            None => match Self::default_config_path().filter(|path| path.exists()) {
                Some(path) => {
                    debug!("Loading default config file: {}", path.display());
                    Self::from_file(&path)?
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply environment overrides through a lookup function
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(DATA_DIR_ENV).filter(|value| !value.trim().is_empty()) {
            debug!("{} overrides data directory: {}", DATA_DIR_ENV, dir);
            self.data_dir = PathBuf::from(dir);
        }
    }

    /// Use a custom data directory
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Use a custom page size for raw record viewing
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Override the source file for one city
    pub fn with_dataset_file(mut self, city: City, file: impl Into<String>) -> Self {
        self.datasets
            .retain(|key, _| key.parse::<City>().ok() != Some(city));
        self.datasets.insert(city.key().to_string(), file.into());
        self
    }

    /// Source file name for a city, honouring overrides
    ///
    /// Override keys match the way city names parse, so `"New York City"`
    /// and `"new_york_city"` both select New York City.
    pub fn dataset_file(&self, city: City) -> &str {
        self.datasets
            .iter()
            .find(|(key, _)| key.parse::<City>().ok() == Some(city))
            .map(|(_, file)| file.as_str())
            .unwrap_or_else(|| city.default_file())
    }

    /// Check settings for consistency
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(BikeshareError::configuration(
                "Page size must be greater than 0",
            ));
        }

        if !self.data_dir.is_dir() {
            return Err(BikeshareError::configuration(format!(
                "Data directory does not exist: {}",
                self.data_dir.display()
            )));
        }

        for key in self.datasets.keys() {
            key.parse::<City>().map_err(|_| {
                BikeshareError::configuration(format!(
                    "Dataset override for unknown city '{}'",
                    key
                ))
            })?;
        }

        Ok(())
    }
}
