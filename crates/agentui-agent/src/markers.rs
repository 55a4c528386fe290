//! Marker map
//!
//! A marker names one connection of one node. It stops resolving when the
//! node leaves the document, even if the node comes back later, and an id is
//! never handed to another node: the counter only moves forward.

use agentui_dom::{DomTree, NodeId};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Opaque marker handed to agents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct MarkerId(u32);

impl MarkerId {
    pub fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for MarkerId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Binding {
    node: NodeId,
    epoch: u32,
}

/// Marker → node bindings
#[derive(Debug)]
pub struct MarkerMap {
    bindings: BTreeMap<MarkerId, Binding>,
    by_node: HashMap<NodeId, MarkerId>,
    next: u32,
}

impl Default for MarkerMap {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkerMap {
    pub fn new() -> Self {
        Self {
            bindings: BTreeMap::new(),
            by_node: HashMap::new(),
            next: 1,
        }
    }

    /// Marker of `node` in its current connection, issuing one if needed.
    /// `None` when the node is not connected.
    pub fn assign(&mut self, tree: &DomTree, node: NodeId) -> Option<MarkerId> {
        if !tree.is_connected(node) {
            return None;
        }
        let epoch = tree.connect_epoch(node)?;

        if let Some(&id) = self.by_node.get(&node) {
            if self.bindings.get(&id).is_some_and(|b| b.epoch == epoch) {
                return Some(id);
            }
            self.bindings.remove(&id);
        }

        let id = MarkerId(self.next);
        self.next += 1;
        self.bindings.insert(id, Binding { node, epoch });
        self.by_node.insert(node, id);
        tracing::trace!(marker = %id, node = %node, "issued marker");
        Some(id)
    }

    /// Current marker of `node`, without issuing
    pub fn marker_of(&self, tree: &DomTree, node: NodeId) -> Option<MarkerId> {
        let id = *self.by_node.get(&node)?;
        self.resolve(tree, id).map(|_| id)
    }

    /// Node a marker was issued for, if that connection is still live
    pub fn resolve(&self, tree: &DomTree, id: MarkerId) -> Option<NodeId> {
        let binding = self.bindings.get(&id)?;
        let live = tree.is_connected(binding.node)
            && tree.connect_epoch(binding.node) == Some(binding.epoch);
        live.then_some(binding.node)
    }

    /// Live bindings in marker order
    pub fn live(&self, tree: &DomTree) -> Vec<(MarkerId, NodeId)> {
        self.bindings
            .keys()
            .filter_map(|&id| self.resolve(tree, id).map(|node| (id, node)))
            .collect()
    }

    /// Drop bindings whose connection ended
    pub fn prune(&mut self, tree: &DomTree) {
        let stale: Vec<MarkerId> = self.bindings
            .keys()
            .copied()
            .filter(|&id| self.resolve(tree, id).is_none())
            .collect();
        for id in stale {
            if let Some(binding) = self.bindings.remove(&id) {
                if self.by_node.get(&binding.node) == Some(&id) {
                    self.by_node.remove(&binding.node);
                }
            }
        }
    }

    /// Retire every issued marker. Ids are not reused afterwards.
    pub fn retire_all(&mut self) {
        self.bindings.clear();
        self.by_node.clear();
    }

    /// Number of bindings held, live or not
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
