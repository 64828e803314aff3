//! Facet filter over accords and notes.

use crate::traits::{Predicate, contains_lowered};
use catalog::{Facet, Perfume};

/// Keeps perfumes where every requested value is found in the facet list.
///
/// ## Algorithm
/// AND across requested values, OR across the item's entries: for each
/// requested value at least one item entry must contain it. A perfume with
/// an empty list for the facet fails any non-empty request.
pub struct FacetPredicate {
    facet: Facet,
    name: String,
    requested: Vec<String>,
}

impl FacetPredicate {
    /// `requested` values must already be lowercased.
    pub fn new(facet: Facet, requested: Vec<String>) -> Self {
        Self {
            facet,
            name: format!("FacetPredicate({})", facet.label()),
            requested,
        }
    }

    pub fn facet(&self) -> Facet {
        self.facet
    }
}

impl Predicate for FacetPredicate {
    fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self, perfume: &Perfume) -> bool {
        let values = perfume.facet_values(self.facet);
        self.requested
            .iter()
            .all(|wanted| values.iter().any(|value| contains_lowered(value, wanted)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_requested_value_must_match() {
        let predicate =
            FacetPredicate::new(Facet::Accords, vec!["woody".to_string(), "sweet".to_string()]);

        let both = Perfume::new("A").with_accords(["Woody", "Sweet", "Amber"]);
        let one = Perfume::new("B").with_accords(["Woody", "Fresh"]);
        let partials = Perfume::new("C").with_accords(["Soft Woody", "Sweetish"]);

        assert!(predicate.matches(&both));
        assert!(!predicate.matches(&one));
        assert!(predicate.matches(&partials));
    }

    #[test]
    fn test_missing_facet_list_fails_safely() {
        let predicate = FacetPredicate::new(Facet::BaseNotes, vec!["musk".to_string()]);
        assert!(!predicate.matches(&Perfume::new("Empty")));
    }

    #[test]
    fn test_checks_the_right_facet() {
        let predicate = FacetPredicate::new(Facet::TopNotes, vec!["lemon".to_string()]);
        let perfume = Perfume::new("Citrus")
            .with_accords(["Lemon"])
            .with_notes(Facet::TopNotes, ["Bergamot"]);

        assert!(!predicate.matches(&perfume));
        assert_eq!(predicate.name(), "FacetPredicate(topNotes)");
    }
}
