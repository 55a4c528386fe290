//! Agent surface of an extended context
//!
//! Calls that need schemas await the catalog first, so the first discovery
//! call on a page triggers the one-time fetch.

use crate::AgentUi;
use agentui_agent::{
    AgentBridge, ComponentDescription, ComponentTreeNode, DescribeTarget, LabelMatch, MarkerId,
    McpAction,
};
use agentui_catalog::SchemaEntry;
use agentui_dom::NodeId;
use agentui_elements::Page;
use std::collections::BTreeMap;

/// Borrowed agent handle; see [`AgentUi::extend_with_agent`]
#[derive(Debug)]
pub struct Agent<'a> {
    ui: &'a mut AgentUi,
}

impl<'a> Agent<'a> {
    pub(crate) fn new(ui: &'a mut AgentUi) -> Self {
        Self { ui }
    }

    fn parts(&mut self) -> (&mut AgentBridge, &mut Page) {
        let ui = &mut *self.ui;
        (ui.bridge.get_or_insert_with(AgentBridge::new), &mut ui.page)
    }

    /// Tag → schema for every describable registered component
    pub async fn discover_all(&mut self) -> BTreeMap<String, SchemaEntry> {
        let catalog = self.ui.load_descriptions().await;
        let (bridge, page) = self.parts();
        bridge.discover_all(page, &catalog)
    }

    /// Component tree under `root`, the body by default
    pub async fn get_component_tree(&mut self, root: Option<NodeId>) -> Option<ComponentTreeNode> {
        let catalog = self.ui.load_descriptions().await;
        let (bridge, page) = self.parts();
        bridge.get_component_tree(page, Some(&catalog), root)
    }

    pub async fn describe(&mut self, target: impl Into<DescribeTarget>) -> Option<ComponentDescription> {
        let catalog = self.ui.load_descriptions().await;
        let (bridge, page) = self.parts();
        bridge.describe(page, Some(&catalog), target)
    }

    pub fn find_by_label(&mut self, text: &str) -> Option<LabelMatch> {
        let (bridge, page) = self.parts();
        bridge.find_by_label(page, text)
    }

    pub fn enable_visual_markers(&mut self) -> usize {
        let (bridge, page) = self.parts();
        bridge.enable_visual_markers(page)
    }

    pub fn disable_visual_markers(&mut self) {
        let (bridge, page) = self.parts();
        bridge.disable_visual_markers(page);
    }

    pub fn get_marker_map(&mut self) -> BTreeMap<MarkerId, NodeId> {
        let (bridge, page) = self.parts();
        bridge.get_marker_map(page)
    }

    pub fn get_marker_element(&mut self, id: MarkerId) -> Option<NodeId> {
        let (bridge, page) = self.parts();
        bridge.get_marker_element(page, id)
    }

    pub async fn get_mcp_actions(&mut self) -> Vec<McpAction> {
        let catalog = self.ui.load_descriptions().await;
        let (bridge, page) = self.parts();
        bridge.get_mcp_actions(page, &catalog)
    }

    /// The underlying page
    pub fn page(&self) -> &Page {
        &self.ui.page
    }
}
