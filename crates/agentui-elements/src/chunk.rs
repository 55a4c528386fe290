//! Bundle chunks
//!
//! A chunk is the set of component classes one bundle file defines when it
//! is evaluated. Chunks overlap: shared components appear in several of
//! them and any load order must leave the registry in the same state.

use crate::{ComponentClass, Page, Registration, RegistryError};
use std::fmt;
use std::sync::Arc;

/// Component classes defined together
#[derive(Clone)]
pub struct BundleChunk {
    name: String,
    classes: Vec<(String, Arc<dyn ComponentClass>)>,
}

/// Result of loading one chunk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkLoadReport {
    pub chunk: String,
    pub defined: Vec<String>,
    pub already_defined: Vec<String>,
    pub rejected: Vec<(String, RegistryError)>,
}

impl ChunkLoadReport {
    /// Nothing new was registered
    pub fn is_noop(&self) -> bool {
        self.defined.is_empty()
    }
}

impl BundleChunk {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            classes: Vec::new(),
        }
    }

    /// Add a class under `tag`
    pub fn with(mut self, tag: &str, class: Arc<dyn ComponentClass>) -> Self {
        self.classes.push((tag.to_string(), class));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(|(tag, _)| tag.as_str())
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Define every class of the chunk on `page`. Never fails: duplicate
    /// tags are skipped and invalid names are reported.
    pub fn load_into(&self, page: &mut Page) -> ChunkLoadReport {
        let mut report = ChunkLoadReport {
            chunk: self.name.clone(),
            ..Default::default()
        };

        for (tag, class) in &self.classes {
            match page.define(tag, class.clone()) {
                Ok(Registration::Defined) => report.defined.push(tag.clone()),
                Ok(Registration::AlreadyDefined) => report.already_defined.push(tag.clone()),
                Err(e) => {
                    tracing::warn!(chunk = %self.name, tag = %tag, "skipping definition: {}", e);
                    report.rejected.push((tag.clone(), e));
                }
            }
        }

        tracing::debug!(
            chunk = %self.name,
            defined = report.defined.len(),
            skipped = report.already_defined.len(),
            "chunk loaded"
        );
        report
    }
}

impl fmt::Debug for BundleChunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BundleChunk")
            .field("name", &self.name)
            .field("tags", &self.tags().collect::<Vec<_>>())
            .finish()
    }
}
