//! AgentUI DOM - headless Document Object Model
//!
//! Arena-based DOM tree used to host AgentUI components outside a browser.
//! Nodes are never freed or reused while the tree lives, so a [`NodeId`]
//! always names the same logical node.

mod node;
mod tree;
mod document;
mod dom_events;

pub use node::{Attribute, ElementData, Node, NodeData};
pub use tree::{Children, DomTree, Traverse};
pub use document::Document;
pub use dom_events::{DomEvent, DomEventType};

use serde::Serialize;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root (document) node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check that this is not the sentinel
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Raw arena index
    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// DOM error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Hierarchy request error: cannot insert {child} into {parent}")]
    HierarchyRequest { parent: NodeId, child: NodeId },

    #[error("Node {0} is not an element")]
    NotAnElement(NodeId),

    #[error("Reference node {0} is not a child of the parent")]
    NotAChild(NodeId),
}
