//! Single-item and batch matching entry points.
//!
//! `filter_collection` is what the browse engine calls in local mode and
//! what the in-memory store uses to serve pages.

use crate::match_pipeline::MatchPipeline;
use catalog::{FilterCriteria, Perfume};
use rayon::prelude::*;
use std::cmp::Ordering;
use tracing::debug;

/// Collections at least this large are matched on the rayon pool.
pub const PARALLEL_THRESHOLD: usize = 2048;

/// Does `perfume` satisfy every active constraint of `criteria`?
pub fn matches(perfume: &Perfume, criteria: &FilterCriteria) -> bool {
    MatchPipeline::from_criteria(criteria).matches(perfume)
}

/// Matching perfumes, sorted by name.
///
/// The sort always happens, so the unfiltered browsing order is alphabetical.
/// It is stable: perfumes with identical names keep their input order.
pub fn filter_collection(perfumes: &[Perfume], criteria: &FilterCriteria) -> Vec<Perfume> {
    let pipeline = MatchPipeline::from_criteria(criteria);

    let mut kept: Vec<Perfume> = if perfumes.len() >= PARALLEL_THRESHOLD {
        // Order-preserving: indexed parallel iterators collect in input order
        perfumes
            .par_iter()
            .filter(|perfume| pipeline.matches(perfume))
            .cloned()
            .collect()
    } else {
        pipeline.apply(perfumes).into_iter().cloned().collect()
    };

    sort_by_name(&mut kept);
    debug!(
        "filter_collection: {} of {} perfumes kept ({} predicates)",
        kept.len(),
        perfumes.len(),
        pipeline.len()
    );
    kept
}

/// Stable, case-insensitive alphabetical sort on name.
pub fn sort_by_name(perfumes: &mut [Perfume]) {
    perfumes.sort_by_cached_key(|perfume| name_sort_key(&perfume.name));
}

/// Compare two names the way `filter_collection` orders them.
///
/// Lowercased first so "apple" and "Banana" sort alphabetically; the raw
/// name breaks ties between names that differ only by case.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    name_sort_key(a).cmp(&name_sort_key(b))
}

fn name_sort_key(name: &str) -> (String, String) {
    (name.to_lowercase(), name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_names_is_case_insensitive() {
        assert_eq!(compare_names("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_names("Zest", "amber"), Ordering::Greater);
        assert_eq!(compare_names("Aqua", "Aqua"), Ordering::Equal);
        assert_ne!(compare_names("aqua", "Aqua"), Ordering::Equal);
    }

    #[test]
    fn test_matches_with_empty_criteria() {
        assert!(matches(&Perfume::new("Anything"), &FilterCriteria::default()));
    }

    #[test]
    fn test_parallel_and_sequential_paths_agree() {
        let perfumes: Vec<Perfume> = (0..PARALLEL_THRESHOLD + 10)
            .map(|i| {
                let accord = if i % 3 == 0 { "Woody" } else { "Fresh" };
                Perfume::new(format!("Perfume {:05}", PARALLEL_THRESHOLD + 10 - i))
                    .with_accords([accord])
            })
            .collect();
        let criteria = FilterCriteria {
            accords: vec!["woody".to_string()],
            ..FilterCriteria::default()
        };

        let parallel = filter_collection(&perfumes, &criteria);
        let sequential = filter_collection(&perfumes[..PARALLEL_THRESHOLD - 1], &criteria);

        assert!(parallel.iter().all(|p| p.accords == vec!["Woody"]));
        assert!(parallel.windows(2).all(|w| compare_names(&w[0].name, &w[1].name).is_le()));
        assert!(sequential.windows(2).all(|w| compare_names(&w[0].name, &w[1].name).is_le()));
        assert_eq!(
            parallel.len(),
            perfumes.iter().filter(|p| p.accords[0] == "Woody").count()
        );
    }
}
