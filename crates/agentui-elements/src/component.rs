//! Component instances
//!
//! Hooks get no handle on the page. A render or attribute reaction therefore
//! cannot mutate the attribute that triggered it.

use crate::{ListenerScope, TimerId};
use agentui_dom::{Attribute, NodeId};

/// Inputs to a render
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub tag: &'a str,
    /// Current attribute values
    pub attributes: &'a [Attribute],
    /// Light-DOM text captured when the instance connected
    pub content: &'a str,
}

impl<'a> RenderContext<'a> {
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.attributes.iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    pub fn attr_or(&self, name: &str, default: &'a str) -> &'a str {
        self.attr(name).unwrap_or(default)
    }

    /// Boolean attribute: present and not "false"
    pub fn flag(&self, name: &str) -> bool {
        self.attr(name).is_some_and(|v| v != "false")
    }
}

/// Event delivered to a component listener
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentEvent {
    pub event_type: String,
    /// Node the event was dispatched at
    pub target: NodeId,
    /// Node the listener was registered on
    pub current_target: NodeId,
}

/// Instance side of a component
pub trait Component {
    /// One-time setup when the node enters the document. Everything acquired
    /// through `scope` is released on disconnection.
    fn connected(&mut self, _scope: &mut ListenerScope) {}

    /// Compute markup from the current attributes and captured content
    fn render(&self, ctx: &RenderContext<'_>) -> String;

    /// An observed attribute changed value
    fn attribute_changed(&mut self, _name: &str, _old: Option<&str>, _new: Option<&str>) {}

    /// The node left the document
    fn disconnected(&mut self) {}

    /// A listener registered in the current scope matched an event
    fn handle_event(&mut self, _event: &ComponentEvent) {}

    /// A timer registered in the current scope fired
    fn timer_fired(&mut self, _timer: TimerId) {}
}
