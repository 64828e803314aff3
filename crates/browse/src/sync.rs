//! Keeps the displayed page in step with the filter and pagination state.
//!
//! The controller subscribes to `BrowseState` once. Each time changes are
//! drained it turns them into fetch requests:
//! - `FilterChanged`: one page request for page 1 plus one count request
//! - `PageChanged`: one page request for the new page
//!
//! Requests carry tokens from per-concern counters. A response is applied
//! only if its token is the latest of its concern, so a slow response can
//! never overwrite a newer one.

use crate::error::{BrowseError, Concern};
use crate::state::{BrowseState, StateChange};
use crate::token::{RequestToken, TokenCounter};
use catalog::{FilterCriteria, Perfume, ResultPage};
use catalog_store::StoreError;
use tokio::sync::mpsc;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub token: RequestToken,
    pub criteria: FilterCriteria,
    pub page_number: u32,
    pub items_per_page: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountRequest {
    pub token: RequestToken,
    pub collection: String,
    pub criteria: FilterCriteria,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    Page(PageRequest),
    Count(CountRequest),
}

pub struct SyncController {
    changes: mpsc::UnboundedReceiver<StateChange>,
    collection: String,
    page_tokens: TokenCounter,
    count_tokens: TokenCounter,
    current_page: Option<ResultPage>,
    last_error: Option<BrowseError>,
}

impl SyncController {
    /// Subscribe to `state`. There is exactly one subscription per
    /// controller.
    pub fn new(state: &mut BrowseState, collection: impl Into<String>) -> Self {
        Self {
            changes: state.subscribe(),
            collection: collection.into(),
            page_tokens: TokenCounter::new(Concern::Page),
            count_tokens: TokenCounter::new(Concern::Count),
            current_page: None,
            last_error: None,
        }
    }

    /// Requests for the first load: the current page and the count.
    pub fn initial_requests(&mut self, state: &BrowseState) -> Vec<FetchRequest> {
        vec![self.page_request(state), self.count_request(state)]
    }

    /// Drain pending state changes into fetch requests.
    ///
    /// Changes drained together are coalesced; a filter change subsumes any
    /// page change because it already refetches the current page.
    pub fn poll_changes(&mut self, state: &BrowseState) -> Vec<FetchRequest> {
        let mut filter_changed = false;
        let mut page_changed = false;
        while let Ok(change) = self.changes.try_recv() {
            match change {
                StateChange::FilterChanged => filter_changed = true,
                StateChange::PageChanged { .. } => page_changed = true,
                StateChange::TotalPagesChanged { .. } => {}
            }
        }

        if filter_changed {
            self.initial_requests(state)
        } else if page_changed {
            vec![self.page_request(state)]
        } else {
            Vec::new()
        }
    }

    /// Apply a page response.
    ///
    /// Success replaces the displayed page and clears the error flag; a
    /// failure keeps the previous page and sets the flag.
    pub fn apply_page(
        &mut self,
        token: RequestToken,
        result: Result<ResultPage, StoreError>,
    ) -> Result<(), BrowseError> {
        self.page_tokens.complete(token)?;
        match result {
            Ok(page) => {
                debug!(
                    "sync: applied page {} ({} items)",
                    page.page_number,
                    page.items.len()
                );
                self.current_page = Some(page);
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                warn!("sync: page fetch failed: {}", e);
                let err = BrowseError::FetchFailed {
                    concern: Concern::Page,
                    message: e.to_string(),
                };
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Apply a count response. On failure the last known count stays.
    pub fn apply_count(
        &mut self,
        token: RequestToken,
        result: Result<u64, StoreError>,
        state: &mut BrowseState,
    ) -> Result<(), BrowseError> {
        self.count_tokens.complete(token)?;
        match result {
            Ok(total) => {
                debug!("sync: total count {}", total);
                state.set_total_count(total);
                Ok(())
            }
            Err(e) => {
                warn!("sync: count fetch failed: {}", e);
                Err(BrowseError::FetchFailed {
                    concern: Concern::Count,
                    message: e.to_string(),
                })
            }
        }
    }

    /// Items of the last successfully applied page.
    pub fn items(&self) -> &[Perfume] {
        self.current_page
            .as_ref()
            .map(|page| page.items.as_slice())
            .unwrap_or_default()
    }

    pub fn current_page(&self) -> Option<&ResultPage> {
        self.current_page.as_ref()
    }

    pub fn last_error(&self) -> Option<&BrowseError> {
        self.last_error.as_ref()
    }

    /// True while the latest page request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.page_tokens.is_pending()
    }

    fn page_request(&mut self, state: &BrowseState) -> FetchRequest {
        let pagination = state.pagination();
        FetchRequest::Page(PageRequest {
            token: self.page_tokens.issue(),
            criteria: state.criteria().clone(),
            page_number: pagination.page_number(),
            items_per_page: pagination.items_per_page(),
        })
    }

    fn count_request(&mut self, state: &BrowseState) -> FetchRequest {
        FetchRequest::Count(CountRequest {
            token: self.count_tokens.issue(),
            collection: self.collection.clone(),
            criteria: state.criteria().clone(),
        })
    }
}
