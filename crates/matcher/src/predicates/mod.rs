//! Predicate implementations for the matching pipeline.
//!
//! One predicate per kind of constraint in `FilterCriteria`; the
//! `MatchPipeline` composes whichever of them are active.

pub mod brand;
pub mod facet;
pub mod gender;
pub mod search_text;

// Re-export for convenience
pub use brand::BrandPredicate;
pub use facet::FacetPredicate;
pub use gender::GenderPredicate;
pub use search_text::SearchTextPredicate;
