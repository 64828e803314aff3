//! The infinite-scroll window over the current result page.

/// How many of the current results are visible.
///
/// Starts at one increment and grows by one increment per `grow` call. It
/// is reset whenever the filter changes or new page data arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleWindow {
    increment: usize,
    loaded_count: usize,
}

impl VisibleWindow {
    pub fn new(increment: usize) -> Self {
        let increment = increment.max(1);
        Self {
            increment,
            loaded_count: increment,
        }
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded_count
    }

    /// Grow by one increment unless the window already covers
    /// `collection_len` items. Returns true if it grew.
    pub fn grow(&mut self, collection_len: usize) -> bool {
        if self.loaded_count >= collection_len {
            return false;
        }
        self.loaded_count += self.increment;
        true
    }

    pub fn reset(&mut self) {
        self.loaded_count = self.increment;
    }

    /// The first `min(loaded_count, items.len())` items.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..self.loaded_count.min(items.len())]
    }
}
