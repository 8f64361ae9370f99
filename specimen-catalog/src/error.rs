//! Typed error types for specimen-catalog.
//!
//! Every variant is fatal to catalog creation. Lookups never produce these;
//! a name without a record is reported as `None`.

use std::collections::TryReserveError;
use std::path::PathBuf;

use thiserror::Error;

/// Which of the catalog's indexed tables an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    /// The `file` table.
    Files,
    /// The `link` table and its hash buckets.
    Links,
    /// The `fontset` table and its hash buckets.
    Fontsets,
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Table::Files => "file",
            Table::Links => "link",
            Table::Fontsets => "fontset",
        })
    }
}

/// Errors that prevent a [`Catalog`](crate::Catalog) from being created.
#[derive(Debug, Error)]
pub enum CatalogError {
    // -----------------------------------------------------------------------
    // Locating and reading the document
    // -----------------------------------------------------------------------
    /// No catalog path could be derived from the environment or settings.
    #[error("catalog location could not be determined")]
    Locate,

    /// The catalog document does not exist.
    #[error("catalog not found at '{}'", .path.display())]
    NotFound {
        /// Path that was probed.
        path: PathBuf,
    },

    /// The catalog document exists but could not be read.
    #[error("catalog read failed for '{}': {source}", .path.display())]
    Io {
        /// Path of the unreadable document.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    // -----------------------------------------------------------------------
    // Document structure
    // -----------------------------------------------------------------------
    /// The document is not valid JSON or does not have the catalog shape.
    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A hash bucket declares a key outside the table.
    #[error("{table} hash bucket key {key} is outside the table (size {size})", size = crate::HASH_SIZE)]
    BucketKeyOutOfRange {
        /// Table the bucket belongs to.
        table: Table,
        /// Offending key.
        key: u32,
    },

    /// The same bucket key appears twice for one table.
    #[error("{table} hash bucket key {key} is declared more than once")]
    DuplicateBucketKey {
        /// Table the bucket belongs to.
        table: Table,
        /// Repeated key.
        key: u32,
    },

    /// A record or bucket refers to a row past the end of its target table.
    #[error("{what} refers to {table} #{index}, but the table has {len} entries")]
    IndexOutOfRange {
        /// Table being indexed.
        table: Table,
        /// Where the reference was found.
        what: String,
        /// Offending index.
        index: u32,
        /// Length of the indexed table.
        len: usize,
    },

    /// A link record does not name any file.
    #[error("link record '{name}' has no instances")]
    EmptyInstance {
        /// Name of the link record.
        name: String,
    },

    // -----------------------------------------------------------------------
    // Table construction
    // -----------------------------------------------------------------------
    /// Memory for the hash tables could not be obtained.
    #[error("hash table allocation failed: {0}")]
    Allocation(#[from] TryReserveError),
}

impl CatalogError {
    /// Whether this error means the catalog simply is not there.
    ///
    /// Callers usually treat a missing catalog as "no font lookups" and
    /// everything else as a broken installation worth reporting.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::Locate | CatalogError::NotFound { .. })
    }
}
