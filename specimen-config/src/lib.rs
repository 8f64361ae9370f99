//! Configuration for the specimen font catalog.
//!
//! This crate provides:
//!
//! - Catalog path resolution behind the [`CatalogLocator`] trait
//! - The optional `config.yaml` settings file
//! - Default font directories and the catalog file name

pub mod config;
pub mod defaults;
pub mod error;
pub mod locator;
mod types;

// Re-export main types for convenience
pub use config::Config;
pub use error::ConfigError;
pub use locator::{CatalogLocator, EnvLocator, FixedLocator};
pub use types::LogLevel;
