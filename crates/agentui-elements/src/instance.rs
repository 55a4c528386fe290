//! Live instances
//!
//! A component instance bound to a node of the page. The page owns it; other
//! layers refer to it by [`NodeId`] only.

use crate::{
    Component, ComponentDefinition, Lifecycle, LifecycleError, LifecycleEvent, LifecycleState,
    ListenerScope, RenderContext,
};
use agentui_dom::{DomTree, NodeId};
use std::fmt;
use std::sync::Arc;

/// Mounted component instance
pub struct LiveInstance {
    node: NodeId,
    definition: Arc<ComponentDefinition>,
    component: Box<dyn Component>,
    lifecycle: Lifecycle,
    scope: Option<ListenerScope>,
    content: String,
    markup: Option<String>,
}

impl LiveInstance {
    pub(crate) fn new(node: NodeId, definition: Arc<ComponentDefinition>) -> Self {
        let component = definition.class.construct();
        Self {
            node,
            definition,
            component,
            lifecycle: Lifecycle::new(),
            scope: None,
            content: String::new(),
            markup: None,
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn tag(&self) -> &str {
        &self.definition.tag_name
    }

    pub fn definition(&self) -> &Arc<ComponentDefinition> {
        &self.definition
    }

    pub fn state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    /// Output of the last render
    pub fn markup(&self) -> Option<&str> {
        self.markup.as_deref()
    }

    /// Light-DOM text captured at connection
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Scope of the current connection
    pub fn scope(&self) -> Option<&ListenerScope> {
        self.scope.as_ref()
    }

    pub(crate) fn component_mut(&mut self) -> &mut dyn Component {
        self.component.as_mut()
    }

    pub(crate) fn scope_and_component(&mut self) -> (Option<&mut ListenerScope>, &mut dyn Component) {
        (self.scope.as_mut(), self.component.as_mut())
    }

    pub(crate) fn connect(&mut self, tree: &DomTree) -> Result<(), LifecycleError> {
        self.lifecycle.transition(LifecycleEvent::Connect)?;
        self.content = tree.text_content(self.node);

        let mut scope = ListenerScope::new(self.node);
        self.component.connected(&mut scope);
        self.scope = Some(scope);

        self.render(tree)
    }

    pub(crate) fn render(&mut self, tree: &DomTree) -> Result<(), LifecycleError> {
        self.lifecycle.transition(LifecycleEvent::Render)?;
        let attributes = tree.get(self.node)
            .and_then(|n| n.as_element())
            .map(|e| e.attrs.as_slice())
            .unwrap_or(&[]);
        let ctx = RenderContext {
            tag: &self.definition.tag_name,
            attributes,
            content: &self.content,
        };
        self.markup = Some(self.component.render(&ctx));
        Ok(())
    }

    /// React to an attribute mutation; returns whether a re-render happened
    pub(crate) fn attribute_changed(
        &mut self,
        tree: &DomTree,
        name: &str,
        old: Option<&str>,
        new: Option<&str>,
    ) -> Result<bool, LifecycleError> {
        if !self.definition.observes(name) || old == new || !self.state().is_attached() {
            return Ok(false);
        }
        self.lifecycle.transition(LifecycleEvent::AttributeChange)?;
        self.component.attribute_changed(name, old, new);
        self.render(tree)?;
        Ok(true)
    }

    pub(crate) fn disconnect(&mut self) -> Result<(), LifecycleError> {
        self.lifecycle.transition(LifecycleEvent::Disconnect)?;
        self.component.disconnected();
        if let Some(scope) = self.scope.take() {
            tracing::debug!(
                node = %self.node,
                listeners = scope.listener_count(),
                timers = scope.timer_count(),
                "released connection scope"
            );
        }
        Ok(())
    }
}

impl fmt::Debug for LiveInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveInstance")
            .field("node", &self.node)
            .field("tag", &self.definition.tag_name)
            .field("state", &self.lifecycle.state())
            .finish()
    }
}
