//! Component tree snapshots

use crate::{accessible_label, MarkerId, MarkerMap};
use agentui_catalog::DescribeCatalog;
use agentui_dom::NodeId;
use agentui_elements::Page;
use serde::Serialize;
use std::collections::BTreeMap;

/// Serializable view of one component in the live tree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentTreeNode {
    pub tag: String,
    /// `None` for a walk root that is not itself a component
    pub marker_id: Option<MarkerId>,
    pub node: NodeId,
    /// Current attribute values
    pub attributes: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Summary line from the describe catalog
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub children: Vec<ComponentTreeNode>,
}

impl ComponentTreeNode {
    /// Nodes of the subtree in document order, this one first
    pub fn iter(&self) -> impl Iterator<Item = &ComponentTreeNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }

    /// First node of the subtree with `tag`
    pub fn find(&self, tag: &str) -> Option<&ComponentTreeNode> {
        self.iter().find(|n| n.tag == tag)
    }
}

pub(crate) struct TreeBuilder<'a> {
    pub page: &'a Page,
    pub catalog: Option<&'a DescribeCatalog>,
    pub markers: &'a mut MarkerMap,
}

impl TreeBuilder<'_> {
    /// Snapshot rooted at `root`. Unregistered elements below the root are
    /// skipped and their component descendants lifted to the nearest
    /// component ancestor.
    pub fn build(&mut self, root: NodeId) -> Option<ComponentTreeNode> {
        self.page.tree().get(root)?.as_element()?;

        let component = self.is_component(root);
        let mut node = self.snapshot(root, component);
        node.children = self.collect_children(root);
        Some(node)
    }

    fn collect_children(&mut self, parent: NodeId) -> Vec<ComponentTreeNode> {
        let tree = self.page.tree();
        let children: Vec<NodeId> = tree.children(parent)
            .filter(|(_, n)| n.is_element())
            .map(|(id, _)| id)
            .collect();

        let mut out = Vec::new();
        for child in children {
            if self.is_component(child) {
                let mut node = self.snapshot(child, true);
                node.children = self.collect_children(child);
                out.push(node);
            } else {
                out.extend(self.collect_children(child));
            }
        }
        out
    }

    fn is_component(&self, node: NodeId) -> bool {
        self.page.tree()
            .tag_name(node)
            .is_some_and(|tag| self.page.registry().is_defined(tag))
    }

    fn snapshot(&mut self, node: NodeId, component: bool) -> ComponentTreeNode {
        let page = self.page;
        let tree = page.tree();
        let tag = tree.tag_name(node).unwrap_or_default().to_string();
        let attributes = tree.get(node)
            .and_then(|n| n.as_element())
            .map(|e| e.attrs.iter().map(|a| (a.name.clone(), a.value.clone())).collect())
            .unwrap_or_default();
        if !component {
            return ComponentTreeNode {
                tag,
                marker_id: None,
                node,
                attributes,
                label: None,
                description: None,
                children: Vec::new(),
            };
        }

        let description = self.catalog
            .and_then(|c| c.get(&tag))
            .map(|entry| entry.summary().to_string())
            .filter(|s| !s.is_empty());

        ComponentTreeNode {
            marker_id: self.markers.assign(tree, node),
            node,
            attributes,
            label: accessible_label(tree, node),
            description,
            children: Vec::new(),
            tag,
        }
    }
}
