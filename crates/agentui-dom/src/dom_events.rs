//! DOM Events
//!
//! Mutation records queued by the tree. A host drains them after each
//! mutation to run custom element reactions in mutation order.

use crate::NodeId;

/// DOM mutation event types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomEventType {
    /// Element became connected to the document
    NodeInsertedIntoDocument,
    /// Element left the document
    NodeRemovedFromDocument,
    /// Attribute added, changed or removed
    AttrModified,
}

/// DOM mutation event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomEvent {
    pub event_type: DomEventType,
    pub target: NodeId,
    pub attr_name: Option<String>,
    pub prev_value: Option<String>,
    pub new_value: Option<String>,
}

impl DomEvent {
    /// Create node inserted-into-document event
    pub fn inserted(target: NodeId) -> Self {
        Self {
            event_type: DomEventType::NodeInsertedIntoDocument,
            target,
            attr_name: None,
            prev_value: None,
            new_value: None,
        }
    }

    /// Create node removed-from-document event
    pub fn removed(target: NodeId) -> Self {
        Self {
            event_type: DomEventType::NodeRemovedFromDocument,
            target,
            attr_name: None,
            prev_value: None,
            new_value: None,
        }
    }

    /// Create attribute modified event
    pub fn attr_modified(target: NodeId, name: &str, old_value: Option<&str>, new_value: Option<&str>) -> Self {
        Self {
            event_type: DomEventType::AttrModified,
            target,
            attr_name: Some(name.to_string()),
            prev_value: old_value.map(|s| s.to_string()),
            new_value: new_value.map(|s| s.to_string()),
        }
    }
}
