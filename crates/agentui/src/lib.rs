//! AgentUI
//!
//! Discovery and agent-introspection layer for AgentUI component pages.
//!
//! # Example
//! ```rust,ignore
//! use agentui::{AgentUi, Config, Page};
//!
//! let mut ui = AgentUi::with_http(Config::from_env(), Page::new("https://app.example/"))?;
//! ui.load_standard_chunks();
//! let mut agent = ui.extend_with_agent();
//! let schemas = smol::block_on(agent.discover_all());
//! ```

mod config;
mod context;
mod agent;

pub use config::Config;
pub use context::AgentUi;
pub use agent::Agent;

pub use agentui_agent::{
    ActionKind, AgentBridge, ComponentDescription, ComponentTreeNode, DescribeTarget, LabelMatch,
    MarkerId, McpAction,
};
pub use agentui_catalog::{CatalogLoader, CatalogState, DescribeCatalog, SchemaEntry, SchemaIndex};
pub use agentui_dom::NodeId;
pub use agentui_elements::{BundleChunk, ChunkLoadReport, Page, Registration};

// Re-export sub-crates for advanced usage
pub use agentui_dom as dom;
pub use agentui_net as net;
pub use agentui_catalog as catalog;
pub use agentui_elements as elements;
pub use agentui_components as components;
pub use agentui_agent as agent_bridge;

use tracing_subscriber::EnvFilter;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Facade error
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Network setup failed: {0}")]
    Net(#[from] agentui_net::NetError),

    #[error("Logging already initialised: {0}")]
    Logging(String),
}

/// Install a `tracing` fmt subscriber filtered by `RUST_LOG`, falling back to
/// [`Config::log_filter`]
pub fn init_tracing(config: &Config) -> Result<(), Error> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))
}
