//! Catalog store client interface.
//!
//! The browse engine never reads the catalog directly; it asks a store for
//! one page, a count, or a handful of name suggestions. This crate defines
//! that interface and ships an in-memory implementation:
//! - `CatalogStore`: the async trait the engine is generic over
//! - `InMemoryStore`: serves a `CatalogIndex`, with optional artificial
//!   latency and failure injection
//!
//! Every call is idempotent, so callers may simply re-issue on failure.

pub mod error;
pub mod in_memory;

use catalog::{FilterCriteria, ResultPage};
use std::future::Future;

pub use error::StoreError;
pub use in_memory::InMemoryStore;

/// The remote catalog collaborator.
///
/// Returned futures must be `Send` so the engine can run them on spawned
/// tasks.
pub trait CatalogStore: Send + Sync + 'static {
    /// Fetch one page of perfumes matching `criteria`.
    ///
    /// # Arguments
    /// * `criteria` - Current filter criteria
    /// * `page_number` - 1-based page index
    /// * `items_per_page` - Page size, greater than zero
    fn query_page(
        &self,
        criteria: &FilterCriteria,
        page_number: u32,
        items_per_page: u32,
    ) -> impl Future<Output = Result<ResultPage, StoreError>> + Send;

    /// Count the perfumes of `collection`.
    ///
    /// Stores that can count server-side should honour `criteria` so the
    /// page count follows the filter; a store that can only count whole
    /// collections may ignore it.
    fn query_count(
        &self,
        collection: &str,
        criteria: &FilterCriteria,
    ) -> impl Future<Output = Result<u64, StoreError>> + Send;

    /// Names starting with `prefix`, for type-ahead.
    fn query_suggestions(
        &self,
        prefix: &str,
    ) -> impl Future<Output = Result<Vec<String>, StoreError>> + Send;
}
