//! In-memory catalog store.
//!
//! Serves pages, counts and suggestions from a `CatalogIndex` using the same
//! matcher the engine uses locally. Latency and failures can be injected so
//! the engine's ordering and error handling can be exercised without a real
//! backend.

use crate::{CatalogStore, StoreError};
use catalog::{CatalogIndex, FilterCriteria, ResultPage};
use matcher::{MatchPipeline, compare_names, filter_collection};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::debug;

/// Default number of names returned by `query_suggestions`.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 10;

/// One call received by the store, recorded for inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Page {
        criteria: FilterCriteria,
        page_number: u32,
        items_per_page: u32,
    },
    Count {
        collection: String,
    },
    Suggestions {
        prefix: String,
    },
}

/// A `CatalogStore` backed by an in-memory `CatalogIndex`.
pub struct InMemoryStore {
    index: Arc<CatalogIndex>,
    suggestion_limit: usize,
    latency: Duration,
    page_latencies: HashMap<u32, Duration>,
    prefix_latencies: HashMap<String, Duration>,
    fail_pages: AtomicBool,
    fail_counts: AtomicBool,
    fail_suggestions: AtomicBool,
    calls: Mutex<Vec<StoreCall>>,
}

impl InMemoryStore {
    /// Create a store over an index.
    pub fn new(index: Arc<CatalogIndex>) -> Self {
        Self {
            index,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            latency: Duration::ZERO,
            page_latencies: HashMap::new(),
            prefix_latencies: HashMap::new(),
            fail_pages: AtomicBool::new(false),
            fail_counts: AtomicBool::new(false),
            fail_suggestions: AtomicBool::new(false),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Delay every response by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Delay responses for one specific page; overrides `with_latency`.
    pub fn with_page_latency(mut self, page_number: u32, latency: Duration) -> Self {
        self.page_latencies.insert(page_number, latency);
        self
    }

    /// Delay suggestions for one exact prefix; overrides `with_latency`.
    pub fn with_prefix_latency(mut self, prefix: impl Into<String>, latency: Duration) -> Self {
        self.prefix_latencies.insert(prefix.into(), latency);
        self
    }

    pub fn with_suggestion_limit(mut self, limit: usize) -> Self {
        self.suggestion_limit = limit;
        self
    }

    pub fn index(&self) -> &CatalogIndex {
        &self.index
    }

    pub fn set_fail_pages(&self, fail: bool) {
        self.fail_pages.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_counts(&self, fail: bool) {
        self.fail_counts.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_suggestions(&self, fail: bool) {
        self.fail_suggestions.store(fail, Ordering::SeqCst);
    }

    /// Every call received so far, in arrival order.
    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().clone()
    }

    /// Prefixes of the suggestion queries received so far.
    pub fn suggestion_prefixes(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                StoreCall::Suggestions { prefix } => Some(prefix.clone()),
                _ => None,
            })
            .collect()
    }

    /// Page numbers requested so far.
    pub fn requested_pages(&self) -> Vec<u32> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                StoreCall::Page { page_number, .. } => Some(*page_number),
                _ => None,
            })
            .collect()
    }

    pub fn count_calls(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, StoreCall::Count { .. }))
            .count()
    }

    fn record(&self, call: StoreCall) {
        self.calls.lock().push(call);
    }

    async fn delay(&self, latency: Duration) {
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }

    fn unavailable(&self, flag: &AtomicBool, what: &str) -> Result<(), StoreError> {
        if flag.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(format!("{what} query failed")));
        }
        Ok(())
    }
}

impl CatalogStore for InMemoryStore {
    async fn query_page(
        &self,
        criteria: &FilterCriteria,
        page_number: u32,
        items_per_page: u32,
    ) -> Result<ResultPage, StoreError> {
        self.record(StoreCall::Page {
            criteria: criteria.clone(),
            page_number,
            items_per_page,
        });
        let latency = self
            .page_latencies
            .get(&page_number)
            .copied()
            .unwrap_or(self.latency);
        self.delay(latency).await;
        self.unavailable(&self.fail_pages, "page")?;

        if page_number == 0 || items_per_page == 0 {
            return Err(StoreError::InvalidRequest(format!(
                "page {page_number} of size {items_per_page}"
            )));
        }

        let matched = filter_collection(self.index.perfumes(), criteria);
        let start = (page_number as usize - 1).saturating_mul(items_per_page as usize);
        let items: Vec<_> = matched
            .into_iter()
            .skip(start)
            .take(items_per_page as usize)
            .collect();
        debug!(
            "query_page: page {} returned {} items",
            page_number,
            items.len()
        );
        Ok(ResultPage::new(page_number, items))
    }

    async fn query_count(
        &self,
        collection: &str,
        criteria: &FilterCriteria,
    ) -> Result<u64, StoreError> {
        self.record(StoreCall::Count {
            collection: collection.to_string(),
        });
        self.delay(self.latency).await;
        self.unavailable(&self.fail_counts, "count")?;

        if collection != self.index.collection() {
            return Err(StoreError::UnknownCollection {
                name: collection.to_string(),
            });
        }

        let pipeline = MatchPipeline::from_criteria(criteria);
        let count = self
            .index
            .perfumes()
            .iter()
            .filter(|perfume| pipeline.matches(perfume))
            .count();
        Ok(count as u64)
    }

    async fn query_suggestions(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        self.record(StoreCall::Suggestions {
            prefix: prefix.to_string(),
        });
        let latency = self
            .prefix_latencies
            .get(prefix)
            .copied()
            .unwrap_or(self.latency);
        self.delay(latency).await;
        self.unavailable(&self.fail_suggestions, "suggestion")?;

        let mut names: Vec<String> = self
            .index
            .names_with_prefix(prefix)
            .into_iter()
            .map(str::to_string)
            .collect();
        names.sort_by(|a, b| compare_names(a, b));
        names.dedup();
        names.truncate(self.suggestion_limit);
        Ok(names)
    }
}
