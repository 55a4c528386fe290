//! Element Registry
//!
//! The same component class is compiled into several bundle chunks and each
//! chunk defines it on load, so defining an existing tag is a no-op instead
//! of an error. The first definition wins.

use crate::{ComponentClass, ComponentDefinition, ComponentMetadata};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Outcome of [`ElementRegistry::define`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// The tag was new and is now registered
    Defined,
    /// The tag was already registered; nothing changed
    AlreadyDefined,
}

/// Registry errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Invalid custom element name: {0}")]
    InvalidName(String),
}

/// Tag name → definition
#[derive(Debug, Default)]
pub struct ElementRegistry {
    definitions: BTreeMap<String, Arc<ComponentDefinition>>,
    debug: bool,
}

impl ElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log duplicate definitions
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    /// Define a custom element
    pub fn define(
        &mut self,
        tag_name: &str,
        class: Arc<dyn ComponentClass>,
    ) -> Result<Registration, RegistryError> {
        if !is_valid_custom_element_name(tag_name) {
            return Err(RegistryError::InvalidName(tag_name.to_string()));
        }

        if let Some(existing) = self.definitions.get(tag_name) {
            if self.debug {
                let incoming = class.metadata();
                if incoming == existing.metadata {
                    tracing::warn!(tag = tag_name, "custom element already defined, skipping");
                } else {
                    tracing::warn!(
                        tag = tag_name,
                        existing = ?existing.metadata,
                        ?incoming,
                        "custom element already defined with different metadata, keeping the first"
                    );
                }
            }
            return Ok(Registration::AlreadyDefined);
        }

        let definition = ComponentDefinition::new(tag_name, class);
        tracing::debug!(tag = tag_name, base = %definition.metadata.base_class, "defined custom element");
        self.definitions.insert(tag_name.to_string(), Arc::new(definition));
        Ok(Registration::Defined)
    }

    /// Get element definition
    pub fn get(&self, tag_name: &str) -> Option<&Arc<ComponentDefinition>> {
        self.definitions.get(tag_name)
    }

    /// Check if element is defined
    pub fn is_defined(&self, tag_name: &str) -> bool {
        self.definitions.contains_key(tag_name)
    }

    /// Readiness check, the synchronous face of `whenDefined`
    pub fn when_defined(&self, tag_name: &str) -> bool {
        self.is_defined(tag_name)
    }

    /// Tag → metadata for every registered tag
    pub fn get_registered_components(&self) -> BTreeMap<&str, &ComponentMetadata> {
        self.definitions
            .iter()
            .map(|(tag, def)| (tag.as_str(), &def.metadata))
            .collect()
    }

    /// Definitions sorted by tag
    pub fn definitions(&self) -> impl Iterator<Item = &Arc<ComponentDefinition>> {
        self.definitions.values()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// Validate custom element name
pub fn is_valid_custom_element_name(name: &str) -> bool {
    // Must contain hyphen
    if !name.contains('-') {
        return false;
    }

    // Must start with lowercase letter
    if !name.starts_with(|c: char| c.is_ascii_lowercase()) {
        return false;
    }

    if name.chars().any(|c| c.is_ascii_uppercase() || c.is_whitespace()) {
        return false;
    }

    // Reserved names
    let reserved = ["annotation-xml", "color-profile", "font-face",
                   "font-face-src", "font-face-uri", "font-face-format",
                   "font-face-name", "missing-glyph"];
    !reserved.contains(&name)
}
