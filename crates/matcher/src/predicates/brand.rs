//! Keep perfumes whose brand contains the requested brand.

use crate::traits::{Predicate, contains_lowered};
use catalog::Perfume;

/// Substring match on brand, so "Dior" also keeps "Christian Dior".
pub struct BrandPredicate {
    brand: String,
}

impl BrandPredicate {
    /// `brand` must already be lowercased.
    pub fn new(brand: impl Into<String>) -> Self {
        Self {
            brand: brand.into(),
        }
    }
}

impl Predicate for BrandPredicate {
    fn name(&self) -> &str {
        "BrandPredicate"
    }

    fn matches(&self, perfume: &Perfume) -> bool {
        contains_lowered(&perfume.brand, &self.brand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brand_predicate() {
        let predicate = BrandPredicate::new("dior");

        assert!(predicate.matches(&Perfume::new("Sauvage").with_brand("Dior")));
        assert!(predicate.matches(&Perfume::new("Fahrenheit").with_brand("Christian DIOR")));
        assert!(!predicate.matches(&Perfume::new("No. 5").with_brand("Chanel")));
        assert!(!predicate.matches(&Perfume::new("Unbranded")));
    }
}
