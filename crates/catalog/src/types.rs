//! Core domain types for the perfume catalog.
//!
//! These are the values that flow between the store, the matcher and the
//! browse engine. The catalog owns the items; everything downstream only
//! borrows or clones them.

use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};

/// Name of the collection queried when none is configured.
pub const DEFAULT_COLLECTION: &str = "perfumes";

// =============================================================================
// Perfume
// =============================================================================

/// A single perfume in the catalog.
///
/// Every text field defaults to empty when absent from the source record,
/// so facet checks against a missing list simply find nothing to match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Perfume {
    /// Opaque store key, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub descriptions: String,
    #[serde(default)]
    pub accords: Vec<String>,
    #[serde(default, alias = "top_notes")]
    pub top_notes: Vec<String>,
    #[serde(default, alias = "middle_notes")]
    pub middle_notes: Vec<String>,
    #[serde(default, alias = "base_notes")]
    pub base_notes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "image_url")]
    pub image_url: Option<String>,
}

impl Perfume {
    /// Create a perfume with just a name; the rest can be filled with the
    /// `with_*` helpers.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = gender.into();
        self
    }

    pub fn with_descriptions(mut self, descriptions: impl Into<String>) -> Self {
        self.descriptions = descriptions.into();
        self
    }

    pub fn with_accords<I, S>(mut self, accords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accords = accords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_notes<I, S>(mut self, facet: Facet, notes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let notes: Vec<String> = notes.into_iter().map(Into::into).collect();
        match facet {
            Facet::Accords => self.accords = notes,
            Facet::TopNotes => self.top_notes = notes,
            Facet::MiddleNotes => self.middle_notes = notes,
            Facet::BaseNotes => self.base_notes = notes,
        }
        self
    }

    /// Item-side values for a facet.
    pub fn facet_values(&self, facet: Facet) -> &[String] {
        match facet {
            Facet::Accords => &self.accords,
            Facet::TopNotes => &self.top_notes,
            Facet::MiddleNotes => &self.middle_notes,
            Facet::BaseNotes => &self.base_notes,
        }
    }
}

// =============================================================================
// Facets and filter criteria
// =============================================================================

/// The list-valued attributes a perfume can be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facet {
    Accords,
    TopNotes,
    MiddleNotes,
    BaseNotes,
}

impl Facet {
    pub const ALL: [Facet; 4] = [
        Facet::Accords,
        Facet::TopNotes,
        Facet::MiddleNotes,
        Facet::BaseNotes,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Facet::Accords => "accords",
            Facet::TopNotes => "topNotes",
            Facet::MiddleNotes => "middleNotes",
            Facet::BaseNotes => "baseNotes",
        }
    }
}

/// What the user is currently filtering by.
///
/// The default value constrains nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    pub search_query: String,
    pub brand: Option<String>,
    pub gender: Option<String>,
    pub accords: Vec<String>,
    pub top_notes: Vec<String>,
    pub middle_notes: Vec<String>,
    pub base_notes: Vec<String>,
}

impl FilterCriteria {
    /// Requested values for a facet.
    pub fn facet_values(&self, facet: Facet) -> &[String] {
        match facet {
            Facet::Accords => &self.accords,
            Facet::TopNotes => &self.top_notes,
            Facet::MiddleNotes => &self.middle_notes,
            Facet::BaseNotes => &self.base_notes,
        }
    }

    /// True when no field imposes a constraint.
    pub fn is_empty(&self) -> bool {
        self.search_query.trim().is_empty()
            && is_blank(self.brand.as_deref())
            && is_blank(self.gender.as_deref())
            && Facet::ALL
                .iter()
                .all(|facet| self.facet_values(*facet).iter().all(|v| v.trim().is_empty()))
    }

    /// Apply a single field update.
    pub fn apply(&mut self, field: FilterField) {
        match field {
            FilterField::SearchQuery(query) => self.search_query = query,
            FilterField::Brand(brand) => self.brand = brand,
            FilterField::Gender(gender) => self.gender = gender,
            FilterField::Facet(Facet::Accords, values) => self.accords = values,
            FilterField::Facet(Facet::TopNotes, values) => self.top_notes = values,
            FilterField::Facet(Facet::MiddleNotes, values) => self.middle_notes = values,
            FilterField::Facet(Facet::BaseNotes, values) => self.base_notes = values,
        }
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

/// A single-field update to `FilterCriteria`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterField {
    SearchQuery(String),
    Brand(Option<String>),
    Gender(Option<String>),
    Facet(Facet, Vec<String>),
}

impl FilterField {
    /// Parse a `key=value` style update.
    ///
    /// List fields take a comma-separated value; an empty value clears the
    /// field. Keys are accepted in both camelCase and snake_case.
    ///
    /// Example: `("accords", "Woody, Sweet")` -> `Facet(Accords, ["Woody", "Sweet"])`
    pub fn parse(key: &str, value: &str) -> Result<Self> {
        let optional = |v: &str| {
            let v = v.trim();
            (!v.is_empty()).then(|| v.to_string())
        };
        let list = |v: &str| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        };

        match key {
            "searchQuery" | "search_query" | "query" => Ok(Self::SearchQuery(value.to_string())),
            "brand" => Ok(Self::Brand(optional(value))),
            "gender" => Ok(Self::Gender(optional(value))),
            "accords" => Ok(Self::Facet(Facet::Accords, list(value))),
            "topNotes" | "top_notes" => Ok(Self::Facet(Facet::TopNotes, list(value))),
            "middleNotes" | "middle_notes" => Ok(Self::Facet(Facet::MiddleNotes, list(value))),
            "baseNotes" | "base_notes" => Ok(Self::Facet(Facet::BaseNotes, list(value))),
            _ => Err(CatalogError::UnknownField {
                key: key.to_string(),
            }),
        }
    }
}

// =============================================================================
// Store result shapes
// =============================================================================

/// One page of results returned by a store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultPage {
    pub page_number: u32,
    pub items: Vec<Perfume>,
}

impl ResultPage {
    pub fn new(page_number: u32, items: Vec<Perfume>) -> Self {
        Self { page_number, items }
    }

    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(|p| p.name.as_str()).collect()
    }
}
