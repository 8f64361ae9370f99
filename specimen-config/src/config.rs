//! Settings file loading and path helpers for `Config`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::error::ConfigError;
use crate::locator::{CatalogLocator, EnvLocator, FixedLocator};
use crate::types::LogLevel;

/// User settings, read from `config.yaml` in the specimen config directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Explicit catalog path; overrides the environment-derived location.
    pub catalog_path: Option<PathBuf>,

    /// Directories scanned by catalog generation.
    pub font_dirs: Vec<PathBuf>,

    /// Log verbosity.
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: None,
            font_dirs: defaults::font_dirs(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load the settings file at its default location, or defaults if absent.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Load settings from `path`, or defaults if the file does not exist.
    ///
    /// Nothing is written back; a missing file stays missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("Config file {:?} not found, using defaults", path);
            return Ok(Self::default());
        }

        log::info!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_yaml_ng::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.font_dirs.iter().any(|d| d.as_os_str().is_empty()) {
            return Err(ConfigError::Validation(
                "font_dirs must not contain empty paths".to_string(),
            ));
        }
        if let Some(path) = &self.catalog_path
            && path.as_os_str().is_empty()
        {
            return Err(ConfigError::Validation(
                "catalog_path must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Locator for the catalog: the explicit path if set, else the environment.
    pub fn locator(&self) -> Box<dyn CatalogLocator> {
        match &self.catalog_path {
            Some(path) => Box::new(FixedLocator::new(path.clone())),
            None => Box::new(EnvLocator::new()),
        }
    }

    /// Directory holding `config.yaml`: `~/.config/specimen` on Unix-likes
    /// and macOS, the roaming application data folder on Windows, or the
    /// working directory when no home can be found.
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("specimen")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("specimen")
            } else {
                PathBuf::from(".")
            }
        }
    }

    /// Get the settings file path.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }
}
