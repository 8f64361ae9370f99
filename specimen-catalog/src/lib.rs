//! Precomputed font catalog index.
//!
//! This crate provides:
//! - Loading of a catalog document produced offline by a font scanner
//! - Exact full-name lookup of a face and family lookup of its fontset
//! - The generator side: directory scanning and catalog building
//!
//! # Architecture
//!
//! The [`Catalog`] owns the parsed [`CatalogDocument`] and two fixed-size
//! [`HashTable`]s whose buckets are replayed from the document:
//! 1. Query name is hashed with [`hash_name`]
//! 2. The matching bucket yields candidate record indices
//! 3. The first candidate whose name matches exactly wins
//!
//! Records come back as borrowed views ([`Font`], [`Fontset`]) tied to the
//! catalog's lifetime. [`FontCatalog`] wraps an optional shared catalog for
//! callers that must keep running when no catalog is installed.

pub mod builder;
pub mod document;
pub mod error;
pub mod hash;
pub mod hash_table;
pub mod names;
pub mod scanner;
pub mod session;
pub mod store;

// Re-export main types for convenience
pub use builder::{CatalogBuilder, write_document};
pub use document::{BucketEntry, CatalogDocument, FileRecord, FontsetRecord, LinkRecord};
pub use error::{CatalogError, Table};
pub use hash::{HASH_PRIME, HASH_SIZE, hash_name};
pub use hash_table::HashTable;
pub use names::NameCollection;
pub use session::FontCatalog;
pub use store::{Catalog, Font, Fontset, NameKey, Resolution};
