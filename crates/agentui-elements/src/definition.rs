//! Component definitions
//!
//! A [`ComponentClass`] is the static side of a component: metadata plus a
//! constructor. Introspection is an optional capability exposed through
//! [`ComponentClass::as_describable`].

use crate::Component;
use agentui_catalog::{DescribeCatalog, SchemaEntry};
use std::fmt;
use std::sync::Arc;

/// Static metadata recorded at definition time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentMetadata {
    /// Name of the base class the component extends
    pub base_class: String,
    /// Attributes whose changes trigger a re-render, in declaration order
    pub observed_attributes: Vec<String>,
    /// Key of the component stylesheet, if it has one
    pub style_key: Option<String>,
}

impl ComponentMetadata {
    pub fn new(base_class: &str) -> Self {
        Self {
            base_class: base_class.to_string(),
            ..Default::default()
        }
    }

    pub fn observe(mut self, attrs: &[&str]) -> Self {
        self.observed_attributes.extend(attrs.iter().map(|a| a.to_string()));
        self
    }

    pub fn style(mut self, key: &str) -> Self {
        self.style_key = Some(key.to_string());
        self
    }
}

/// Class side of a component
pub trait ComponentClass: Send + Sync {
    /// Definition metadata
    fn metadata(&self) -> ComponentMetadata;

    /// Construct a fresh, unattached instance
    fn construct(&self) -> Box<dyn Component>;

    /// Introspection capability, if the class supports it
    fn as_describable(&self) -> Option<&dyn Describable> {
        None
    }
}

/// Introspection capability
pub trait Describable {
    /// Schema for `tag`, by default the catalog entry
    fn describe(&self, tag: &str, catalog: &DescribeCatalog) -> Option<SchemaEntry> {
        catalog.get(tag).cloned()
    }
}

/// A registered tag
#[derive(Clone)]
pub struct ComponentDefinition {
    pub tag_name: String,
    pub class: Arc<dyn ComponentClass>,
    pub metadata: ComponentMetadata,
}

impl ComponentDefinition {
    pub fn new(tag_name: &str, class: Arc<dyn ComponentClass>) -> Self {
        let metadata = class.metadata();
        Self {
            tag_name: tag_name.to_string(),
            class,
            metadata,
        }
    }

    /// Whether changes to `attr` are reacted to
    pub fn observes(&self, attr: &str) -> bool {
        self.metadata.observed_attributes.iter().any(|a| a == attr)
    }

    pub fn is_describable(&self) -> bool {
        self.class.as_describable().is_some()
    }
}

impl fmt::Debug for ComponentDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDefinition")
            .field("tag_name", &self.tag_name)
            .field("metadata", &self.metadata)
            .field("describable", &self.is_describable())
            .finish()
    }
}
