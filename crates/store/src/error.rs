//! Errors a catalog store can report.

use thiserror::Error;

/// Errors that can occur when talking to the catalog store.
///
/// The engine treats every variant the same way (a failed fetch); the
/// distinction is for logs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Catalog store unavailable: {0}")]
    Unavailable(String),

    #[error("Unknown collection: {name}")]
    UnknownCollection { name: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}
