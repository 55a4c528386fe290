//! DOM Tree (arena-based allocation)
//!
//! All mutations go through the tree so it can queue [`DomEvent`]s for the
//! elements that enter or leave the document.

use crate::{DomError, DomEvent, Node, NodeData, NodeId};

/// Arena-based DOM tree
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
    mutations: Vec<DomEvent>,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
            mutations: Vec::new(),
        }
    }

    /// The document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize)
    }

    fn node(&self, id: NodeId) -> Result<&Node, DomError> {
        self.get(id).ok_or(DomError::NodeNotFound(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, DomError> {
        self.get_mut(id).ok_or(DomError::NodeNotFound(id))
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::element(tag))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(Node::comment(content))
    }

    /// Parent of a node, if attached
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).map(|n| n.parent).filter(|p| p.is_valid())
    }

    /// Iterate over direct children in DOM order
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.get(id).map(|n| n.first_child).unwrap_or(NodeId::NONE),
        }
    }

    /// Pre-order (document order) walk of `id` and its descendants
    pub fn traverse(&self, id: NodeId) -> Traverse<'_> {
        let stack = if self.get(id).is_some() { vec![id] } else { Vec::new() };
        Traverse { tree: self, stack }
    }

    /// Whether `ancestor` is `node` or one of its ancestors
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = node;
        while current.is_valid() {
            if current == ancestor {
                return true;
            }
            current = match self.get(current) {
                Some(n) => n.parent,
                None => return false,
            };
        }
        false
    }

    /// Whether the node is reachable from the document node
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.get(id).is_some() && self.contains(NodeId::ROOT, id)
    }

    /// Connection counter of a node (0 if it never entered the document)
    pub fn connect_epoch(&self, id: NodeId) -> Option<u32> {
        self.get(id).map(|n| n.connect_epoch)
    }

    /// Append a child, detaching it from its previous parent first
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.insert_before(parent, child, None)
    }

    /// Insert `child` before `reference` (append when `None`)
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<(), DomError> {
        if !self.node(parent)?.can_have_children() {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        self.node(child)?;
        if child == NodeId::ROOT || self.contains(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        if let Some(reference) = reference {
            if self.node(reference)?.parent != parent {
                return Err(DomError::NotAChild(reference));
            }
            if reference == child {
                return Ok(());
            }
        }

        self.detach(child);

        match reference {
            Some(next) => {
                let prev = self.nodes[next.0 as usize].prev_sibling;
                {
                    let node = &mut self.nodes[child.0 as usize];
                    node.parent = parent;
                    node.prev_sibling = prev;
                    node.next_sibling = next;
                }
                self.nodes[next.0 as usize].prev_sibling = child;
                if prev.is_valid() {
                    self.nodes[prev.0 as usize].next_sibling = child;
                } else {
                    self.nodes[parent.0 as usize].first_child = child;
                }
            }
            None => {
                let last = self.nodes[parent.0 as usize].last_child;
                {
                    let node = &mut self.nodes[child.0 as usize];
                    node.parent = parent;
                    node.prev_sibling = last;
                    node.next_sibling = NodeId::NONE;
                }
                if last.is_valid() {
                    self.nodes[last.0 as usize].next_sibling = child;
                } else {
                    self.nodes[parent.0 as usize].first_child = child;
                }
                self.nodes[parent.0 as usize].last_child = child;
            }
        }

        if self.is_connected(parent) {
            let subtree: Vec<NodeId> = self.traverse(child).collect();
            for id in subtree {
                let node = &mut self.nodes[id.0 as usize];
                node.connect_epoch = node.connect_epoch.wrapping_add(1);
                if node.is_element() {
                    self.mutations.push(DomEvent::inserted(id));
                }
            }
        }
        Ok(())
    }

    /// Detach a node (and its subtree) from its parent
    pub fn remove(&mut self, id: NodeId) -> Result<(), DomError> {
        if id == NodeId::ROOT {
            return Err(DomError::HierarchyRequest { parent: NodeId::NONE, child: id });
        }
        self.node(id)?;
        tracing::trace!(node = %id, "detaching subtree");
        self.detach(id);
        Ok(())
    }

    fn detach(&mut self, id: NodeId) {
        let (parent, prev, next) = {
            let node = &self.nodes[id.0 as usize];
            (node.parent, node.prev_sibling, node.next_sibling)
        };
        if !parent.is_valid() {
            return;
        }

        if self.is_connected(id) {
            let removed: Vec<NodeId> = self.traverse(id)
                .filter(|n| self.nodes[n.0 as usize].is_element())
                .collect();
            self.mutations.extend(removed.into_iter().map(DomEvent::removed));
        }

        if prev.is_valid() {
            self.nodes[prev.0 as usize].next_sibling = next;
        } else {
            self.nodes[parent.0 as usize].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.0 as usize].prev_sibling = prev;
        } else {
            self.nodes[parent.0 as usize].last_child = prev;
        }

        let node = &mut self.nodes[id.0 as usize];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }

    /// Lowercased tag name of an element
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.get(id)?.as_element().map(|e| e.tag.as_str())
    }

    /// Get an attribute value
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.get(id)?.as_element()?.get_attr(name)
    }

    /// Set an attribute, returning the previous value
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<Option<String>, DomError> {
        let element = self.node_mut(id)?
            .as_element_mut()
            .ok_or(DomError::NotAnElement(id))?;
        let old = element.set_attr(name, value);
        self.mutations.push(DomEvent::attr_modified(
            id,
            &name.to_ascii_lowercase(),
            old.as_deref(),
            Some(value),
        ));
        Ok(old)
    }

    /// Remove an attribute, returning its value
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<Option<String>, DomError> {
        let element = self.node_mut(id)?
            .as_element_mut()
            .ok_or(DomError::NotAnElement(id))?;
        let old = element.remove_attr(name);
        if old.is_some() {
            self.mutations.push(DomEvent::attr_modified(
                id,
                &name.to_ascii_lowercase(),
                old.as_deref(),
                None,
            ));
        }
        Ok(old)
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        for node_id in self.traverse(id) {
            if let Some(text) = self.nodes[node_id.0 as usize].as_text() {
                out.push_str(text);
            }
        }
        out
    }

    /// Replace the content of a text node
    pub fn set_text(&mut self, id: NodeId, content: &str) -> Result<(), DomError> {
        match &mut self.node_mut(id)?.data {
            NodeData::Text(text) => {
                *text = content.to_string();
                Ok(())
            }
            _ => Err(DomError::NotAnElement(id)),
        }
    }

    /// Drain queued mutation records, oldest first
    pub fn take_mutations(&mut self) -> Vec<DomEvent> {
        std::mem::take(&mut self.mutations)
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the children of a node
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        if !self.next.is_valid() {
            return None;
        }
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

/// Pre-order walk over a subtree
pub struct Traverse<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl Iterator for Traverse<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        let start = self.stack.len();
        self.stack.extend(self.tree.children(id).map(|(child, _)| child));
        self.stack[start..].reverse();
        Some(id)
    }
}
