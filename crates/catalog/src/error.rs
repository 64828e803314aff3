//! Error types for the catalog crate.
//!
//! Loading a catalog can fail at the file level, at the JSON level, or
//! because a record does not meet the minimum the engine relies on
//! (every perfume needs a name to sort by).

use thiserror::Error;

/// Errors that can occur while loading or validating a catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Catalog file could not be found
    #[error("Catalog file not found: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading the catalog
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog file is not a valid JSON array of perfume records
    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A record was parsed but is unusable
    #[error("Invalid record at index {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    /// A filter key that does not name any criteria field
    #[error("Unknown filter field: {key}")]
    UnknownField { key: String },
}

/// Shorthand used across the crate.
pub type Result<T> = std::result::Result<T, CatalogError>;
