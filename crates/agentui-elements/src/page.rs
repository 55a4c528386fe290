//! Page - headless host for AgentUI components
//!
//! Owns the document, the registry and every live instance. Each mutating
//! call drains the tree's mutation records and runs the matching lifecycle
//! reactions synchronously, in mutation order.

use crate::{
    ComponentClass, ComponentEvent, ElementRegistry, LiveInstance, Registration, RegistryError,
};
use agentui_dom::{Document, DomError, DomEventType, DomTree, NodeId};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// A loaded page with its component registry
#[derive(Debug)]
pub struct Page {
    document: Document,
    registry: ElementRegistry,
    instances: HashMap<NodeId, LiveInstance>,
}

impl Page {
    /// Create a page with an empty html/head/body document
    pub fn new(url: &str) -> Self {
        Self {
            document: Document::new(url),
            registry: ElementRegistry::new(),
            instances: HashMap::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn tree(&self) -> &DomTree {
        &self.document.tree
    }

    pub fn body(&self) -> NodeId {
        self.document.body()
    }

    pub fn registry(&self) -> &ElementRegistry {
        &self.registry
    }

    /// Debug mode: duplicate definitions are logged
    pub fn set_debug(&mut self, debug: bool) {
        self.registry.set_debug(debug);
    }

    /// Define a component and upgrade matching elements already in the page
    pub fn define(
        &mut self,
        tag_name: &str,
        class: Arc<dyn ComponentClass>,
    ) -> Result<Registration, RegistryError> {
        let registration = self.registry.define(tag_name, class)?;
        if registration == Registration::Defined {
            let pending: Vec<NodeId> = self.document.get_elements_by_tag_name(tag_name);
            if !pending.is_empty() {
                tracing::debug!(tag = tag_name, count = pending.len(), "upgrading existing elements");
            }
            for node in pending {
                self.connect(node);
            }
        }
        Ok(registration)
    }

    /// Add a bundle script tag to the head
    pub fn add_script(&mut self, src: &str) -> NodeId {
        let node = self.document.add_script(src);
        self.process_mutations();
        node
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.document.tree.create_element(tag)
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.document.tree.create_text(content)
    }

    /// Replace the content of a text node
    pub fn set_text(&mut self, node: NodeId, content: &str) -> Result<(), DomError> {
        self.document.tree.set_text(node, content)
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.document.tree.append_child(parent, child)?;
        self.process_mutations();
        Ok(())
    }

    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) -> Result<(), DomError> {
        self.document.tree.insert_before(parent, child, reference)?;
        self.process_mutations();
        Ok(())
    }

    pub fn remove(&mut self, node: NodeId) -> Result<(), DomError> {
        self.document.tree.remove(node)?;
        self.process_mutations();
        Ok(())
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        self.document.tree.set_attribute(node, name, value)?;
        self.process_mutations();
        Ok(())
    }

    pub fn remove_attribute(&mut self, node: NodeId, name: &str) -> Result<(), DomError> {
        self.document.tree.remove_attribute(node, name)?;
        self.process_mutations();
        Ok(())
    }

    /// Append a new element with text content under `parent`
    pub fn append_element(
        &mut self,
        parent: NodeId,
        tag: &str,
        attrs: &[(&str, &str)],
        text: Option<&str>,
    ) -> Result<NodeId, DomError> {
        let node = self.create_element(tag);
        for (name, value) in attrs {
            self.document.tree.set_attribute(node, name, value)?;
        }
        if let Some(text) = text {
            let text = self.create_text(text);
            self.document.tree.append_child(node, text)?;
        }
        self.append_child(parent, node)?;
        Ok(node)
    }

    /// Instance bound to a node, connected or not
    pub fn instance(&self, node: NodeId) -> Option<&LiveInstance> {
        self.instances.get(&node)
    }

    /// Drop the instances of disconnected nodes, returning how many were
    /// dropped. Arena nodes are never freed, so this is the only space a
    /// long session can reclaim. A released node that is inserted again is
    /// upgraded like a new element.
    pub fn release_detached_instances(&mut self) -> usize {
        let before = self.instances.len();
        let tree = &self.document.tree;
        self.instances.retain(|&node, _| tree.is_connected(node));
        let released = before - self.instances.len();
        if released > 0 {
            tracing::debug!(released, "released detached instances");
        }
        released
    }

    /// Last render output of a node's instance
    pub fn rendered_markup(&self, node: NodeId) -> Option<&str> {
        self.instance(node)?.markup()
    }

    /// Connected instances in document order
    pub fn live_instances(&self) -> Vec<NodeId> {
        self.document.tree
            .traverse(self.document.tree.root())
            .filter(|id| self.instances.get(id).is_some_and(|i| i.state().is_attached()))
            .collect()
    }

    /// Listeners held by all current connections
    pub fn active_listener_count(&self) -> usize {
        self.instances.values()
            .filter_map(|i| i.scope())
            .map(|s| s.listener_count())
            .sum()
    }

    /// Timers held by all current connections
    pub fn active_timer_count(&self) -> usize {
        self.instances.values()
            .filter_map(|i| i.scope())
            .map(|s| s.timer_count())
            .sum()
    }

    /// Dispatch an event at `target`, bubbling to the document.
    ///
    /// Returns the number of handlers invoked.
    pub fn dispatch_event(&mut self, target: NodeId, event_type: &str) -> usize {
        if !self.document.tree.is_connected(target) {
            return 0;
        }

        let mut path = Vec::new();
        let mut current = Some(target);
        while let Some(node) = current {
            path.push(node);
            current = self.document.tree.parent(node);
        }

        let owners = self.live_instances();
        let mut deliveries = Vec::new();
        for &node in &path {
            for &owner in &owners {
                let Some(scope) = self.instances.get(&owner).and_then(|i| i.scope()) else {
                    continue;
                };
                for listening in scope.listening_nodes(event_type) {
                    if listening == node {
                        deliveries.push((owner, node));
                    }
                }
            }
        }

        for &(owner, current_target) in &deliveries {
            if let Some(instance) = self.instances.get_mut(&owner) {
                instance.component_mut().handle_event(&ComponentEvent {
                    event_type: event_type.to_string(),
                    target,
                    current_target,
                });
            }
        }
        deliveries.len()
    }

    /// Advance page time, firing due timers. Returns the number of firings.
    pub fn advance_time(&mut self, delta: Duration) -> usize {
        let mut fired = 0;
        for node in self.live_instances() {
            let Some(instance) = self.instances.get_mut(&node) else {
                continue;
            };
            let (scope, component) = instance.scope_and_component();
            let Some(scope) = scope else {
                continue;
            };
            for timer in scope.advance(delta) {
                component.timer_fired(timer);
                fired += 1;
            }
        }
        fired
    }

    fn process_mutations(&mut self) {
        for event in self.document.tree.take_mutations() {
            match event.event_type {
                DomEventType::NodeInsertedIntoDocument => self.connect(event.target),
                DomEventType::NodeRemovedFromDocument => self.disconnect(event.target),
                DomEventType::AttrModified => {
                    let Some(name) = event.attr_name.as_deref() else {
                        continue;
                    };
                    self.attribute_changed(
                        event.target,
                        name,
                        event.prev_value.as_deref(),
                        event.new_value.as_deref(),
                    );
                }
            }
        }
    }

    fn connect(&mut self, node: NodeId) {
        let tree = &self.document.tree;
        if !tree.is_connected(node) {
            return;
        }
        let Some(definition) = tree.tag_name(node).and_then(|tag| self.registry.get(tag)) else {
            return;
        };
        let instance = self.instances
            .entry(node)
            .or_insert_with(|| LiveInstance::new(node, definition.clone()));
        if let Err(e) = instance.connect(tree) {
            tracing::warn!(node = %node, "connect skipped: {}", e);
        }
    }

    fn disconnect(&mut self, node: NodeId) {
        let Some(instance) = self.instances.get_mut(&node) else {
            return;
        };
        if let Err(e) = instance.disconnect() {
            tracing::warn!(node = %node, "disconnect skipped: {}", e);
        }
    }

    fn attribute_changed(&mut self, node: NodeId, name: &str, old: Option<&str>, new: Option<&str>) {
        let Some(instance) = self.instances.get_mut(&node) else {
            return;
        };
        match instance.attribute_changed(&self.document.tree, name, old, new) {
            Ok(true) => tracing::trace!(node = %node, attr = name, "re-rendered after attribute change"),
            Ok(false) => {}
            Err(e) => tracing::warn!(node = %node, "attribute reaction skipped: {}", e),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new("about:blank")
    }
}
