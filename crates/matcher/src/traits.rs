//! Core trait for the matching pipeline.
//!
//! Each active constraint of a `FilterCriteria` becomes one `Predicate`.
//! Predicates only ever see already-normalized (lowercased, trimmed)
//! requested values, so they do the item-side lowercasing and nothing else.

use catalog::Perfume;

/// A single constraint evaluated against one perfume.
///
/// `Send + Sync` so a pipeline can be shared across rayon workers.
pub trait Predicate: Send + Sync {
    /// Returns the name of this predicate (for logging/debugging)
    fn name(&self) -> &str;

    /// True when `perfume` satisfies this constraint.
    fn matches(&self, perfume: &Perfume) -> bool;
}

/// Case-insensitive substring test; `needle` must already be lowercased.
pub(crate) fn contains_lowered(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
