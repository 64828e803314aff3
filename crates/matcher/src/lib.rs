//! Predicate matching for the perfume catalog.
//!
//! This crate provides:
//! - Predicate trait and one implementation per kind of constraint
//! - MatchPipeline for composing predicates from a `FilterCriteria`
//! - `matches` / `filter_collection`, the pure matching entry points
//!
//! ## Semantics
//! Every comparison is a case-insensitive substring test. Facet lists are
//! AND-of-OR: each requested value must be contained in at least one of the
//! item's entries. Results of `filter_collection` are always sorted by name.
//!
//! ## Example Usage
//! ```ignore
//! use catalog::{FilterCriteria, Perfume};
//! use matcher::filter_collection;
//!
//! let criteria = FilterCriteria {
//!     gender: Some("men".into()),
//!     accords: vec!["Citrus".into()],
//!     ..FilterCriteria::default()
//! };
//! let kept = filter_collection(&perfumes, &criteria);
//! ```

pub mod collection;
pub mod criteria;
pub mod match_pipeline;
pub mod predicates;
pub mod traits;

// Re-export main types
pub use collection::{PARALLEL_THRESHOLD, compare_names, filter_collection, matches, sort_by_name};
pub use criteria::NormalizedCriteria;
pub use match_pipeline::MatchPipeline;
pub use traits::Predicate;
