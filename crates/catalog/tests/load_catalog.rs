//! Loading a catalog from disk end to end.

use catalog::{CatalogError, CatalogIndex, Facet};
use std::io::Write;

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{"id": "1", "name": "Aqua", "brand": "X", "gender": "men", "accords": ["Citrus"]}},
            {{"id": "2", "name": "Bloom", "brand": "Y", "gender": "women", "accords": ["Floral"],
              "topNotes": ["Pear"], "baseNotes": ["Musk"]}}
        ]"#
    )
    .unwrap();

    let index = CatalogIndex::load_from_file(file.path()).unwrap();

    assert_eq!(index.len(), 2);
    assert_eq!(index.collection(), "perfumes");
    assert_eq!(index.get("2").unwrap().base_notes, vec!["Musk"]);
    assert!(index.distinct_facet_values(Facet::TopNotes).contains("pear"));
}

#[test]
fn test_load_invalid_json() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "not json").unwrap();

    let err = CatalogIndex::load_from_file(file.path()).unwrap_err();
    assert!(matches!(err, CatalogError::Json(_)));
}
