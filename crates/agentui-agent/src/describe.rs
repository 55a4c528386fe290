//! Describe results

use crate::MarkerId;
use agentui_catalog::SchemaEntry;
use agentui_dom::NodeId;
use agentui_elements::ComponentMetadata;
use serde::Serialize;
use std::collections::BTreeMap;

/// What to describe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescribeTarget {
    Tag(String),
    Node(NodeId),
}

impl From<&str> for DescribeTarget {
    fn from(tag: &str) -> Self {
        Self::Tag(tag.to_ascii_lowercase())
    }
}

impl From<String> for DescribeTarget {
    fn from(tag: String) -> Self {
        Self::from(tag.as_str())
    }
}

impl From<NodeId> for DescribeTarget {
    fn from(node: NodeId) -> Self {
        Self::Node(node)
    }
}

/// Registry side of a description
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionSummary {
    pub base_class: String,
    pub observed_attributes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_key: Option<String>,
    pub describable: bool,
}

impl DefinitionSummary {
    pub(crate) fn new(metadata: &ComponentMetadata, describable: bool) -> Self {
        Self {
            base_class: metadata.base_class.clone(),
            observed_attributes: metadata.observed_attributes.clone(),
            style_key: metadata.style_key.clone(),
            describable,
        }
    }
}

/// Live side of a node description
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceSummary {
    pub node: NodeId,
    pub connected: bool,
    pub marker_id: Option<MarkerId>,
    pub attributes: BTreeMap<String, String>,
    pub label: Option<String>,
}

/// Everything known about a tag or node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDescription {
    pub tag: String,
    /// `None` when the tag is not registered on the page
    pub definition: Option<DefinitionSummary>,
    /// `None` when the class does not support introspection
    pub schema: Option<SchemaEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<InstanceSummary>,
}

/// Result of a label search
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelMatch {
    pub node: NodeId,
    pub tag: String,
    pub marker_id: Option<MarkerId>,
    pub label: String,
}
