//! AgentUI Agent Bridge
//!
//! Live, queryable model of the rendered component tree for an external
//! controller such as a debugging tool or an AI agent.
//!
//! - [`AgentBridge::get_component_tree`] snapshots components in document order
//! - markers give agents stable handles on live nodes
//! - [`AgentBridge::get_mcp_actions`] derives tool descriptions from schemas
//!
//! Every result type serializes with camelCase fields.

mod label;
mod markers;
mod tree;
mod describe;
mod actions;
mod bridge;

pub use label::{accessible_label, label_matches, labelled, LabelSource, LABEL_ATTRIBUTES};
pub use markers::{MarkerId, MarkerMap};
pub use tree::ComponentTreeNode;
pub use describe::{ComponentDescription, DefinitionSummary, DescribeTarget, InstanceSummary, LabelMatch};
pub use actions::{derive_actions, type_schema, ActionKind, McpAction};
pub use bridge::{AgentBridge, MARKER_ATTRIBUTE, OVERLAY_ATTRIBUTE};
