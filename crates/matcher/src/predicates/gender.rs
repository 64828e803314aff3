//! Keep perfumes whose gender contains the requested gender.

use crate::traits::{Predicate, contains_lowered};
use catalog::Perfume;

/// Gender filter.
///
/// Containment rather than equality, so partial and locale variants of a
/// label ("for men", "men & women") still match. Note that "men" is also a
/// substring of "women"; that is the observed behaviour and is kept.
pub struct GenderPredicate {
    gender: String,
}

impl GenderPredicate {
    /// `gender` must already be lowercased.
    pub fn new(gender: impl Into<String>) -> Self {
        Self {
            gender: gender.into(),
        }
    }
}

impl Predicate for GenderPredicate {
    fn name(&self) -> &str {
        "GenderPredicate"
    }

    fn matches(&self, perfume: &Perfume) -> bool {
        contains_lowered(&perfume.gender, &self.gender)
    }
}
