//! Filter, pagination and window state with change notification.
//!
//! `BrowseState` is the single owner of the filter criteria, the current page
//! and the visible window. Every mutation that should cause a refetch is
//! broadcast as a `StateChange` to the subscribers registered with
//! `subscribe`; the sync controller is the main one.

use crate::config::BrowseConfig;
use crate::error::BrowseError;
use crate::pagination::{PaginationState, PaginationSummary};
use crate::window::VisibleWindow;
use catalog::{FilterCriteria, FilterField};
use tokio::sync::mpsc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChange {
    /// Criteria changed; the page is back at 1
    FilterChanged,
    PageChanged { from: u32, to: u32 },
    TotalPagesChanged { total_pages: u32 },
}

pub struct BrowseState {
    criteria: FilterCriteria,
    pagination: PaginationState,
    window: VisibleWindow,
    subscribers: Vec<mpsc::UnboundedSender<StateChange>>,
}

impl BrowseState {
    pub fn new(config: &BrowseConfig) -> Self {
        Self {
            criteria: FilterCriteria::default(),
            pagination: PaginationState::new(config.items_per_page),
            window: VisibleWindow::new(config.window_increment),
            subscribers: Vec::new(),
        }
    }

    /// Register for change notifications.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<StateChange> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    pub fn window(&self) -> &VisibleWindow {
        &self.window
    }

    pub fn summary(&self) -> PaginationSummary {
        self.pagination.summary()
    }

    /// Replace one criteria field. Always resets the page to 1 and the
    /// window to its initial size, even when the value is unchanged.
    pub fn set_filter_field(&mut self, field: FilterField) {
        debug!("set_filter_field: {:?}", field);
        self.criteria.apply(field);
        self.filter_changed();
    }

    pub fn clear_filters(&mut self) {
        self.criteria = FilterCriteria::default();
        self.filter_changed();
    }

    pub fn set_page(&mut self, n: u32) -> Result<(), BrowseError> {
        let from = self.pagination.page_number();
        let changed = self.pagination.set_page(n)?;
        self.page_moved(from, changed);
        Ok(())
    }

    pub fn next_page(&mut self) -> Result<(), BrowseError> {
        let from = self.pagination.page_number();
        let changed = self.pagination.next_page()?;
        self.page_moved(from, changed);
        Ok(())
    }

    pub fn prev_page(&mut self) -> Result<(), BrowseError> {
        let from = self.pagination.page_number();
        let changed = self.pagination.prev_page()?;
        self.page_moved(from, changed);
        Ok(())
    }

    /// Record the collection size, clamping the page if needed.
    pub fn set_total_count(&mut self, total_items: u64) {
        let before = self.pagination.total_pages();
        let clamped_from = self.pagination.set_total_count(total_items);
        let total_pages = self.pagination.total_pages();

        if total_pages != before {
            self.notify(StateChange::TotalPagesChanged { total_pages });
        }
        if let Some(from) = clamped_from {
            let to = self.pagination.page_number();
            debug!("set_total_count: clamped page {} -> {}", from, to);
            self.notify(StateChange::PageChanged { from, to });
        }
    }

    /// Grow the visible window over a result list of `collection_len` items.
    pub fn grow_window(&mut self, collection_len: usize) -> bool {
        self.window.grow(collection_len)
    }

    pub fn reset_window(&mut self) {
        self.window.reset();
    }

    fn page_moved(&mut self, from: u32, changed: bool) {
        if changed {
            let to = self.pagination.page_number();
            self.notify(StateChange::PageChanged { from, to });
        }
    }

    fn filter_changed(&mut self) {
        self.pagination.reset();
        self.window.reset();
        self.notify(StateChange::FilterChanged);
    }

    fn notify(&mut self, change: StateChange) {
        // Dropped receivers unsubscribe themselves
        self.subscribers.retain(|tx| tx.send(change).is_ok());
    }
}
