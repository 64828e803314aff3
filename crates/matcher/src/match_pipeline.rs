//! The MatchPipeline chains predicates.
//!
//! A pipeline is normally built straight from a `FilterCriteria`, which adds
//! one predicate per active constraint. An empty pipeline keeps everything.

use crate::criteria::NormalizedCriteria;
use crate::predicates::{BrandPredicate, FacetPredicate, GenderPredicate, SearchTextPredicate};
use crate::traits::Predicate;
use catalog::{FilterCriteria, Perfume};
use tracing::debug;

/// Conjunction of predicates.
///
/// ## Usage
/// ```ignore
/// let pipeline = MatchPipeline::new()
///     .add_predicate(BrandPredicate::new("dior"))
///     .add_predicate(FacetPredicate::new(Facet::Accords, vec!["woody".into()]));
///
/// let kept = pipeline.apply(&perfumes);
/// ```
pub struct MatchPipeline {
    predicates: Vec<Box<dyn Predicate>>,
}

impl MatchPipeline {
    /// Create a new empty MatchPipeline.
    pub fn new() -> Self {
        Self {
            predicates: Vec::new(),
        }
    }

    /// Add a predicate to the pipeline (builder pattern).
    pub fn add_predicate(mut self, predicate: impl Predicate + 'static) -> Self {
        self.predicates.push(Box::new(predicate));
        self
    }

    /// Build the pipeline for a set of criteria.
    ///
    /// Inactive fields contribute no predicate at all.
    pub fn from_criteria(criteria: &FilterCriteria) -> Self {
        Self::from_normalized(NormalizedCriteria::from_criteria(criteria))
    }

    pub fn from_normalized(criteria: NormalizedCriteria) -> Self {
        let mut pipeline = Self::new();
        if let Some(query) = criteria.search_query {
            pipeline = pipeline.add_predicate(SearchTextPredicate::new(query));
        }
        if let Some(gender) = criteria.gender {
            pipeline = pipeline.add_predicate(GenderPredicate::new(gender));
        }
        if let Some(brand) = criteria.brand {
            pipeline = pipeline.add_predicate(BrandPredicate::new(brand));
        }
        for (facet, values) in criteria.facets {
            pipeline = pipeline.add_predicate(FacetPredicate::new(facet, values));
        }
        pipeline
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Names of the active predicates, in evaluation order.
    pub fn predicate_names(&self) -> Vec<&str> {
        self.predicates.iter().map(|p| p.name()).collect()
    }

    /// True when every predicate accepts `perfume`.
    pub fn matches(&self, perfume: &Perfume) -> bool {
        self.predicates.iter().all(|p| p.matches(perfume))
    }

    /// Apply predicates one after another, logging how many survive each.
    ///
    /// Input order is preserved.
    pub fn apply<'a>(&self, perfumes: &'a [Perfume]) -> Vec<&'a Perfume> {
        let mut current: Vec<&Perfume> = perfumes.iter().collect();
        for predicate in &self.predicates {
            let input_count = current.len();
            current.retain(|perfume| predicate.matches(perfume));
            debug!(
                "Applied predicate: {} (input count: {}, output count: {})",
                predicate.name(),
                input_count,
                current.len()
            );
        }
        current
    }
}

impl Default for MatchPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::Facet;

    #[test]
    fn test_empty_pipeline() {
        let pipeline = MatchPipeline::new();
        let perfumes = vec![Perfume::new("B"), Perfume::new("A")];

        let kept = pipeline.apply(&perfumes);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].name, "B");
    }

    #[test]
    fn test_from_criteria_only_adds_active_predicates() {
        let criteria = FilterCriteria {
            brand: Some("Dior".to_string()),
            top_notes: vec!["Lemon".to_string()],
            gender: Some("  ".to_string()),
            ..FilterCriteria::default()
        };

        let pipeline = MatchPipeline::from_criteria(&criteria);
        assert_eq!(
            pipeline.predicate_names(),
            vec!["BrandPredicate", "FacetPredicate(topNotes)"]
        );
    }

    #[test]
    fn test_predicates_are_combined_with_and() {
        let pipeline = MatchPipeline::new()
            .add_predicate(BrandPredicate::new("x"))
            .add_predicate(FacetPredicate::new(Facet::Accords, vec!["citrus".to_string()]));

        let perfumes = vec![
            Perfume::new("Aqua").with_brand("X").with_accords(["Citrus"]),
            Perfume::new("Bloom").with_brand("Y").with_accords(["Citrus"]),
            Perfume::new("Cedar").with_brand("X").with_accords(["Woody"]),
        ];

        let kept = pipeline.apply(&perfumes);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "Aqua");
    }
}
