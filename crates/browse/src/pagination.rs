//! Page-number bookkeeping.
//!
//! `total_pages` is derived from the last known item count. Until a first
//! count has arrived page requests are only checked against the lower bound;
//! the page is clamped once the count arrives. After that the page never
//! exceeds `max(total_pages, 1)`.

use crate::error::BrowseError;
use serde::Serialize;

/// Read-only view of the pagination state for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationSummary {
    pub page_number: u32,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState {
    page_number: u32,
    items_per_page: u32,
    /// `None` until the first count arrives
    total_items: Option<u64>,
}

impl PaginationState {
    /// `items_per_page` below one is treated as one.
    pub fn new(items_per_page: u32) -> Self {
        Self {
            page_number: 1,
            items_per_page: items_per_page.max(1),
            total_items: None,
        }
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn items_per_page(&self) -> u32 {
        self.items_per_page
    }

    pub fn total_items(&self) -> u64 {
        self.total_items.unwrap_or(0)
    }

    pub fn is_count_known(&self) -> bool {
        self.total_items.is_some()
    }

    /// `ceil(total_items / items_per_page)`, saturating at `u32::MAX`.
    pub fn total_pages(&self) -> u32 {
        let pages = self.total_items().div_ceil(u64::from(self.items_per_page));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Move to page `n`.
    ///
    /// Returns `Ok(true)` when the page changed and `Ok(false)` when `n` is
    /// already the current page.
    pub fn set_page(&mut self, n: u32) -> Result<bool, BrowseError> {
        let total_pages = self.total_pages();
        let out_of_range = self.is_count_known() && n > total_pages.max(1);
        if n < 1 || out_of_range {
            return Err(BrowseError::InvalidPageRequest {
                requested: n,
                total_pages,
            });
        }
        if n == self.page_number {
            return Ok(false);
        }
        self.page_number = n;
        Ok(true)
    }

    pub fn next_page(&mut self) -> Result<bool, BrowseError> {
        self.set_page(self.page_number.saturating_add(1))
    }

    pub fn prev_page(&mut self) -> Result<bool, BrowseError> {
        self.set_page(self.page_number.saturating_sub(1))
    }

    /// Back to page 1. Returns true if the page changed.
    pub fn reset(&mut self) -> bool {
        let changed = self.page_number != 1;
        self.page_number = 1;
        changed
    }

    /// Record a new item count and clamp the current page into range.
    ///
    /// Returns the page before clamping if the page moved.
    pub fn set_total_count(&mut self, total_items: u64) -> Option<u32> {
        self.total_items = Some(total_items);
        let last = self.total_pages().max(1);
        if self.page_number > last {
            let from = self.page_number;
            self.page_number = last;
            return Some(from);
        }
        None
    }

    pub fn summary(&self) -> PaginationSummary {
        let total_pages = self.total_pages();
        PaginationSummary {
            page_number: self.page_number,
            total_pages,
            has_next: self.page_number < total_pages,
            has_prev: self.page_number > 1,
        }
    }
}
