//! Describe catalog document

use crate::{CatalogError, SchemaEntry};
use std::collections::BTreeMap;

/// Tag name → schema, as loaded from the describe document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DescribeCatalog {
    entries: BTreeMap<String, SchemaEntry>,
}

impl DescribeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a describe document.
    ///
    /// The root must be a JSON object. Entries that fail to deserialize are
    /// skipped with a warning, the rest are kept.
    pub fn from_json(bytes: &[u8]) -> Result<Self, CatalogError> {
        let root: serde_json::Value = serde_json::from_slice(bytes)
            .map_err(|e| CatalogError::Parse(e.to_string()))?;
        let serde_json::Value::Object(map) = root else {
            return Err(CatalogError::NotAnObject);
        };

        let mut entries = BTreeMap::new();
        for (tag, value) in map {
            match serde_json::from_value::<SchemaEntry>(value) {
                Ok(mut entry) => {
                    if entry.name.is_empty() {
                        entry.name = tag.clone();
                    }
                    entries.insert(tag, entry);
                }
                Err(e) => tracing::warn!(tag = %tag, "skipping malformed describe entry: {}", e),
            }
        }
        Ok(Self { entries })
    }

    /// Insert or replace an entry
    pub fn insert(&mut self, tag: &str, entry: SchemaEntry) {
        self.entries.insert(tag.to_string(), entry);
    }

    pub fn get(&self, tag: &str) -> Option<&SchemaEntry> {
        self.entries.get(tag)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.entries.contains_key(tag)
    }

    /// Entries sorted by tag
    pub fn entries(&self) -> &BTreeMap<String, SchemaEntry> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_fills_missing_name() {
        let catalog = DescribeCatalog::from_json(br#"{"au-card": {"description": "Card"}}"#).unwrap();
        assert_eq!(catalog.get("au-card").unwrap().name, "au-card");
    }

    #[test]
    fn test_malformed_entry_is_skipped() {
        let catalog = DescribeCatalog::from_json(br#"{
            "au-card": {"description": "Card"},
            "au-tabs": {"attributes": "not a list"}
        }"#).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(!catalog.contains("au-tabs"));
    }

    #[test]
    fn test_root_must_be_object() {
        assert_eq!(DescribeCatalog::from_json(b"[]"), Err(CatalogError::NotAnObject));
        assert!(matches!(DescribeCatalog::from_json(b"{oops"), Err(CatalogError::Parse(_))));
    }
}
