//! CatalogIndex building and lookups.
//!
//! The index keeps the perfumes in their original order (the matcher's
//! stable sort depends on it) and builds a few secondary views used by the
//! in-memory store and the CLI:
//! - brand index (lowercased brand -> positions)
//! - lowercased names for prefix suggestions

use crate::error::Result;
use crate::parser;
use crate::types::{DEFAULT_COLLECTION, Facet, Perfume};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use tracing::info;

/// In-memory catalog of one collection.
#[derive(Debug, Clone)]
pub struct CatalogIndex {
    collection: String,
    perfumes: Vec<Perfume>,
    /// Lowercased name per position, same order as `perfumes`
    lowered_names: Vec<String>,
    brand_index: HashMap<String, Vec<usize>>,
}

impl CatalogIndex {
    /// Build an index over `perfumes` for the default collection.
    pub fn new(perfumes: Vec<Perfume>) -> Self {
        Self::for_collection(DEFAULT_COLLECTION, perfumes)
    }

    pub fn for_collection(collection: impl Into<String>, perfumes: Vec<Perfume>) -> Self {
        let mut index = Self {
            collection: collection.into(),
            perfumes,
            lowered_names: Vec::new(),
            brand_index: HashMap::new(),
        };
        index.build_secondary_indices();
        index
    }

    /// Load and index a catalog file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading perfume catalog from {}", path.display());
        let perfumes = parser::parse_catalog_file(path)?;
        let index = Self::new(perfumes);
        info!(
            "Loaded {} perfumes across {} brands",
            index.len(),
            index.brand_count()
        );
        Ok(index)
    }

    fn build_secondary_indices(&mut self) {
        self.lowered_names = self.perfumes.iter().map(|p| p.name.to_lowercase()).collect();
        self.brand_index.clear();
        for (position, perfume) in self.perfumes.iter().enumerate() {
            if perfume.brand.trim().is_empty() {
                continue;
            }
            self.brand_index
                .entry(perfume.brand.to_lowercase())
                .or_default()
                .push(position);
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// All perfumes in original order.
    pub fn perfumes(&self) -> &[Perfume] {
        &self.perfumes
    }

    pub fn len(&self) -> usize {
        self.perfumes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.perfumes.is_empty()
    }

    /// Look up a perfume by its store id.
    pub fn get(&self, id: &str) -> Option<&Perfume> {
        self.perfumes.iter().find(|p| p.id.as_deref() == Some(id))
    }

    /// Perfumes of a brand (exact, case-insensitive).
    pub fn by_brand(&self, brand: &str) -> Vec<&Perfume> {
        self.brand_index
            .get(&brand.to_lowercase())
            .map(|positions| positions.iter().map(|&i| &self.perfumes[i]).collect())
            .unwrap_or_default()
    }

    pub fn brand_count(&self) -> usize {
        self.brand_index.len()
    }

    /// Distinct values of a facet, lowercased and sorted.
    pub fn distinct_facet_values(&self, facet: Facet) -> BTreeSet<String> {
        self.perfumes
            .iter()
            .flat_map(|p| p.facet_values(facet))
            .map(|v| v.trim().to_lowercase())
            .filter(|v| !v.is_empty())
            .collect()
    }

    /// Names starting with `prefix` (case-insensitive), in catalog order.
    pub fn names_with_prefix(&self, prefix: &str) -> Vec<&str> {
        let prefix = prefix.to_lowercase();
        self.lowered_names
            .iter()
            .zip(&self.perfumes)
            .filter(|(lowered, _)| lowered.starts_with(&prefix))
            .map(|(_, perfume)| perfume.name.as_str())
            .collect()
    }
}

impl Default for CatalogIndex {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
