//! # Catalog Crate
//!
//! Domain types and loading for the perfume catalog.
//!
//! ## Main Components
//!
//! - **types**: `Perfume`, `FilterCriteria`, `FilterField`, `ResultPage`
//! - **parser**: parse JSON catalog files into `Perfume`s
//! - **index**: `CatalogIndex`, the in-memory view used by the store and CLI
//! - **error**: error types for catalog loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::CatalogIndex;
//! use std::path::Path;
//!
//! let index = CatalogIndex::load_from_file(Path::new("data/perfumes.json"))?;
//! println!("{} perfumes, {} brands", index.len(), index.brand_count());
//! ```

pub mod error;
pub mod index;
pub mod parser;
pub mod types;

pub use error::{CatalogError, Result};
pub use index::CatalogIndex;
pub use types::{DEFAULT_COLLECTION, Facet, FilterCriteria, FilterField, Perfume, ResultPage};
