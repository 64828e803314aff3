//! Error types for the browse engine.
//!
//! None of these are fatal. Page-range errors are swallowed by the engine,
//! stale responses are dropped, and fetch failures degrade to "keep what is
//! on screen" or "no suggestions".

use std::fmt;
use thiserror::Error;

/// Which kind of request a token or error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Concern {
    Page,
    Count,
    Suggestions,
}

impl fmt::Display for Concern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Concern::Page => "page",
            Concern::Count => "count",
            Concern::Suggestions => "suggestions",
        };
        f.write_str(label)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BrowseError {
    /// The store reported an error for a page, count, or suggestion query
    #[error("{concern} fetch failed: {message}")]
    FetchFailed { concern: Concern, message: String },

    /// Page number outside `1..=total_pages`
    #[error("page {requested} is out of range (total pages: {total_pages})")]
    InvalidPageRequest { requested: u32, total_pages: u32 },

    /// A response arrived for a request that has since been superseded
    #[error("stale {concern} response discarded (token {token}, latest {latest})")]
    StaleResponseDiscarded {
        concern: Concern,
        token: u64,
        latest: u64,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl BrowseError {
    /// Errors that are part of normal operation and only worth a debug line.
    pub fn is_benign(&self) -> bool {
        matches!(
            self,
            BrowseError::InvalidPageRequest { .. } | BrowseError::StaleResponseDiscarded { .. }
        )
    }
}
