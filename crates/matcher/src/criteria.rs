//! Criteria normalization.
//!
//! Matching lowercases every requested value exactly once, up front, instead
//! of once per item.

use catalog::{Facet, FilterCriteria};

/// `FilterCriteria` with blanks removed and everything lowercased.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedCriteria {
    pub search_query: Option<String>,
    pub brand: Option<String>,
    pub gender: Option<String>,
    /// Only facets with at least one requested value
    pub facets: Vec<(Facet, Vec<String>)>,
}

impl NormalizedCriteria {
    pub fn from_criteria(criteria: &FilterCriteria) -> Self {
        let facets = Facet::ALL
            .iter()
            .filter_map(|&facet| {
                let values: Vec<String> = criteria
                    .facet_values(facet)
                    .iter()
                    .filter_map(|v| normalize(v))
                    .collect();
                (!values.is_empty()).then_some((facet, values))
            })
            .collect();

        Self {
            search_query: normalize(&criteria.search_query),
            brand: criteria.brand.as_deref().and_then(normalize),
            gender: criteria.gender.as_deref().and_then(normalize),
            facets,
        }
    }
}

/// Whitespace-only values are blank; anything else is matched as typed,
/// surrounding spaces included.
fn normalize(value: &str) -> Option<String> {
    (!value.trim().is_empty()).then(|| value.to_lowercase())
}
