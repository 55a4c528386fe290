//! Component Schema Index
//!
//! Pure read accessors over a loaded catalog. An index built before the
//! catalog settles is empty; it never fetches on its own.

use crate::{DescribeCatalog, SchemaEntry};
use std::collections::BTreeMap;

/// Read-only view over the describe catalog
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaIndex<'a> {
    catalog: Option<&'a DescribeCatalog>,
}

impl<'a> SchemaIndex<'a> {
    pub fn new(catalog: Option<&'a DescribeCatalog>) -> Self {
        Self { catalog }
    }

    /// Whether a catalog is behind this index
    pub fn is_loaded(&self) -> bool {
        self.catalog.is_some()
    }

    /// Schema for one tag
    pub fn get_component_schema(&self, tag: &str) -> Option<&'a SchemaEntry> {
        self.catalog?.get(tag)
    }

    /// Every schema, keyed by tag
    pub fn get_all_schemas(&self) -> BTreeMap<&'a str, &'a SchemaEntry> {
        self.catalog
            .map(|c| c.entries().iter().map(|(tag, entry)| (tag.as_str(), entry)).collect())
            .unwrap_or_default()
    }

    /// Sorted tag names present in the catalog
    pub fn get_schema_components(&self) -> Vec<&'a str> {
        self.catalog
            .map(|c| c.entries().keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Tag → one-line description, the low-token view for agents
    pub fn get_schema_quick_ref(&self) -> BTreeMap<&'a str, &'a str> {
        self.catalog
            .map(|c| c.entries().iter().map(|(tag, entry)| (tag.as_str(), entry.summary())).collect())
            .unwrap_or_default()
    }

    pub fn attribute_names(&self, tag: &str) -> Vec<&'a str> {
        self.names(tag, |e| e.attributes.iter().map(|a| a.name.as_str()).collect())
    }

    pub fn event_names(&self, tag: &str) -> Vec<&'a str> {
        self.names(tag, |e| e.events.iter().map(|ev| ev.name.as_str()).collect())
    }

    pub fn method_names(&self, tag: &str) -> Vec<&'a str> {
        self.names(tag, |e| e.methods.iter().map(|m| m.name.as_str()).collect())
    }

    pub fn slot_names(&self, tag: &str) -> Vec<&'a str> {
        self.names(tag, |e| e.slots.iter().map(|s| s.name.as_str()).collect())
    }

    fn names(&self, tag: &str, pick: impl FnOnce(&'a SchemaEntry) -> Vec<&'a str>) -> Vec<&'a str> {
        self.get_component_schema(tag).map(pick).unwrap_or_default()
    }
}
