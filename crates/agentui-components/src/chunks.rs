//! Standard bundle chunks
//!
//! Mirrors how the library is shipped: a core chunk with the primitives every
//! page needs, and feature chunks that bundle their own copy of the
//! primitives they use.

use crate::{builtin_class, BUILTINS};
use agentui_elements::BundleChunk;

const CORE: &[&str] = &[
    "au-badge", "au-button", "au-card", "au-container", "au-divider", "au-grid", "au-icon",
    "au-layout", "au-link", "au-spinner", "au-stack",
];

const FORMS: &[&str] = &[
    "au-button", "au-checkbox", "au-form", "au-icon", "au-input", "au-radio", "au-select",
    "au-slider", "au-switch", "au-textarea",
];

const DATA: &[&str] = &[
    "au-avatar", "au-badge", "au-button", "au-chip", "au-datatable", "au-icon", "au-list",
    "au-pagination", "au-progress", "au-skeleton", "au-table",
];

const OVERLAY: &[&str] = &[
    "au-alert", "au-button", "au-dialog", "au-dropdown", "au-icon", "au-menu", "au-modal",
    "au-toast", "au-tooltip",
];

const NAVIGATION: &[&str] = &[
    "au-breadcrumb", "au-link", "au-navbar", "au-sidebar", "au-tab", "au-tabs", "au-theme-toggle",
];

const DOCS: &[&str] = &[
    "au-callout", "au-card", "au-code", "au-doc-page", "au-example", "au-splash", "au-tab",
    "au-tabs",
];

/// (chunk name, tags) for every standard chunk
pub const CHUNK_TAGS: &[(&str, &[&str])] = &[
    ("core", CORE),
    ("forms", FORMS),
    ("data", DATA),
    ("overlay", OVERLAY),
    ("navigation", NAVIGATION),
    ("docs", DOCS),
];

/// Build a standard chunk by name
pub fn chunk(name: &str) -> Option<BundleChunk> {
    let (_, tags) = CHUNK_TAGS.iter().find(|(n, _)| *n == name)?;
    Some(build(name, tags))
}

/// Every standard chunk, core first
pub fn standard_chunks() -> Vec<BundleChunk> {
    CHUNK_TAGS.iter().map(|(name, tags)| build(name, tags)).collect()
}

/// A single chunk with every component, as the all-in-one bundle ships
pub fn full_bundle() -> BundleChunk {
    BUILTINS.iter().fold(BundleChunk::new("agentui"), |chunk, spec| {
        match builtin_class(spec.tag) {
            Some(class) => chunk.with(spec.tag, class),
            None => chunk,
        }
    })
}

fn build(name: &str, tags: &[&str]) -> BundleChunk {
    tags.iter().fold(BundleChunk::new(name), |chunk, tag| match builtin_class(tag) {
        Some(class) => chunk.with(tag, class),
        None => {
            tracing::warn!(chunk = name, tag, "unknown component in chunk");
            chunk
        }
    })
}
