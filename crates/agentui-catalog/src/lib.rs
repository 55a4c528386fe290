//! AgentUI Describe Catalog
//!
//! The describe catalog is a JSON document keyed by tag name that documents
//! every component's attributes, properties, methods, events and slots.
//!
//! - [`CatalogLoader`] fetches it at most once, however many callers ask
//! - [`SchemaIndex`] is a read-only view that never triggers a fetch
//! - [`resolve_catalog_url`] finds the document next to the bundle script

mod schema;
mod catalog;
mod locate;
mod loader;
mod index;

pub use schema::{AttributeSchema, EventSchema, MethodSchema, ParamSchema, PropertySchema, SchemaEntry, SlotSchema};
pub use catalog::DescribeCatalog;
pub use locate::{resolve_catalog_url, DEFAULT_CATALOG_FILE, DEFAULT_SCRIPT_HINT};
pub use loader::{CatalogLoader, CatalogState};
pub use index::SchemaIndex;

use agentui_net::NetError;

/// Catalog error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),

    #[error("Catalog fetch failed: {0}")]
    Fetch(#[from] NetError),

    #[error("Malformed catalog: {0}")]
    Parse(String),

    #[error("Catalog root is not an object")]
    NotAnObject,
}
