//! Free-text search across every text field of a perfume.

use crate::traits::{Predicate, contains_lowered};
use catalog::{Facet, Perfume};

/// Keeps perfumes where any searchable field contains the query.
///
/// Searchable fields: name, brand, gender, descriptions, and every entry of
/// accords, top/middle/base notes.
pub struct SearchTextPredicate {
    query: String,
}

impl SearchTextPredicate {
    /// `query` must already be lowercased.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }
}

impl Predicate for SearchTextPredicate {
    fn name(&self) -> &str {
        "SearchTextPredicate"
    }

    fn matches(&self, perfume: &Perfume) -> bool {
        let scalar_fields = [
            &perfume.name,
            &perfume.brand,
            &perfume.gender,
            &perfume.descriptions,
        ];
        scalar_fields
            .into_iter()
            .chain(Facet::ALL.iter().flat_map(|&facet| perfume.facet_values(facet)))
            .any(|field| contains_lowered(field, &self.query))
    }
}
