//! Parser for perfume catalog files.
//!
//! A catalog file is a JSON array of perfume records:
//!
//! ```json
//! [
//!   { "name": "Aqua", "brand": "X", "gender": "men", "accords": ["Citrus"] }
//! ]
//! ```
//!
//! Unknown keys are ignored and missing keys fall back to empty values, so
//! exports from the hosted store can be loaded as they are.

use crate::error::{CatalogError, Result};
use crate::types::Perfume;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Parse a catalog from any reader.
pub fn parse_catalog<R: Read>(reader: R) -> Result<Vec<Perfume>> {
    let perfumes: Vec<Perfume> = serde_json::from_reader(reader)?;
    validate_records(&perfumes)?;
    Ok(perfumes)
}

/// Parse a catalog from a JSON string.
pub fn parse_catalog_str(json: &str) -> Result<Vec<Perfume>> {
    parse_catalog(json.as_bytes())
}

/// Parse a catalog file from disk.
pub fn parse_catalog_file(path: &Path) -> Result<Vec<Perfume>> {
    if !path.exists() {
        return Err(CatalogError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let file = File::open(path)?;
    parse_catalog(BufReader::new(file))
}

/// Every record needs a non-blank name; it is the sort key and the
/// suggestion key.
fn validate_records(perfumes: &[Perfume]) -> Result<()> {
    for (index, perfume) in perfumes.iter().enumerate() {
        if perfume.name.trim().is_empty() {
            return Err(CatalogError::InvalidRecord {
                index,
                reason: "name is empty".to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_catalog_str() {
        let json = r#"[
            {"name": "Aqua", "brand": "X", "gender": "men", "accords": ["Citrus"]},
            {"name": "Bloom", "brand": "Y", "gender": "women", "rating": 4.5}
        ]"#;
        let perfumes = parse_catalog_str(json).unwrap();
        assert_eq!(perfumes.len(), 2);
        assert_eq!(perfumes[0].accords, vec!["Citrus"]);
        assert!(perfumes[1].accords.is_empty());
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let err = parse_catalog_str(r#"[{"name": "Aqua"}, {"name": "  "}]"#).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidRecord { index: 1, .. }));
    }

    #[test]
    fn test_not_an_array_is_rejected() {
        let err = parse_catalog_str(r#"{"name": "Aqua"}"#).unwrap_err();
        assert!(matches!(err, CatalogError::Json(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = parse_catalog_file(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, CatalogError::FileNotFound { .. }));
    }
}
