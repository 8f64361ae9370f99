//! Typed error variants for the specimen-config crate.

use thiserror::Error;

/// Errors that can occur when loading the settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An I/O error occurred reading the settings file.
    #[error("I/O error reading config: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file contained invalid YAML.
    #[error("YAML parse error in config: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    /// A field value failed semantic validation.
    ///
    /// The inner string describes which field is invalid and why.
    #[error("Config validation error: {0}")]
    Validation(String),
}
