//! Agent bridge
//!
//! Joins the live page with the registry and the describe catalog. The
//! bridge owns the marker map and the overlay; everything else is read from
//! the page on each call.

use crate::tree::TreeBuilder;
use crate::{
    accessible_label, derive_actions, label_matches, labelled, ComponentDescription,
    ComponentTreeNode, DefinitionSummary, DescribeTarget, InstanceSummary, LabelMatch, LabelSource,
    MarkerId, MarkerMap, McpAction,
};
use agentui_catalog::{DescribeCatalog, SchemaEntry};
use agentui_dom::{DomError, NodeId};
use agentui_elements::{ComponentDefinition, Page};
use std::collections::BTreeMap;

/// Attribute marking the overlay container
pub const OVERLAY_ATTRIBUTE: &str = "data-au-overlay";
/// Attribute carrying the marker id on each badge
pub const MARKER_ATTRIBUTE: &str = "data-au-marker";

const OVERLAY_STYLE: &str = "position:fixed;inset:0;pointer-events:none;z-index:2147483647";

/// Discovery and marker state for one page
#[derive(Debug, Default)]
pub struct AgentBridge {
    markers: MarkerMap,
    /// Overlay container, while markers are enabled
    overlay: Option<NodeId>,
    /// Container and badges kept across enables; arena nodes are never freed
    container: Option<NodeId>,
    badges: Vec<NodeId>,
}

impl AgentBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag → schema for every registered tag that supports introspection.
    /// Tags missing from the catalog get an entry built from the registry.
    pub fn discover_all(&self, page: &Page, catalog: &DescribeCatalog) -> BTreeMap<String, SchemaEntry> {
        let entries: BTreeMap<String, SchemaEntry> = page.registry()
            .definitions()
            .filter_map(|def| schema_for(def, catalog).map(|schema| (def.tag_name.clone(), schema)))
            .collect();
        tracing::debug!(
            registered = page.registry().len(),
            discovered = entries.len(),
            "discovered components"
        );
        entries
    }

    /// Component tree under `root` (the body by default)
    pub fn get_component_tree(
        &mut self,
        page: &Page,
        catalog: Option<&DescribeCatalog>,
        root: Option<NodeId>,
    ) -> Option<ComponentTreeNode> {
        let root = root.unwrap_or_else(|| page.body());
        self.markers.prune(page.tree());
        TreeBuilder { page, catalog, markers: &mut self.markers }.build(root)
    }

    /// Schema and registry metadata for a tag, plus live state for a node
    pub fn describe(
        &mut self,
        page: &Page,
        catalog: Option<&DescribeCatalog>,
        target: impl Into<DescribeTarget>,
    ) -> Option<ComponentDescription> {
        let empty = DescribeCatalog::new();
        let catalog = catalog.unwrap_or(&empty);

        let (tag, node) = match target.into() {
            DescribeTarget::Tag(tag) => (tag, None),
            DescribeTarget::Node(node) => (page.tree().tag_name(node)?.to_string(), Some(node)),
        };

        let (definition, schema) = match page.registry().get(&tag) {
            Some(def) => (
                Some(DefinitionSummary::new(&def.metadata, def.is_describable())),
                schema_for(def, catalog),
            ),
            None => (None, catalog.get(&tag).cloned()),
        };
        if definition.is_none() && schema.is_none() {
            return None;
        }

        let instance = node.map(|node| {
            let tree = page.tree();
            let component = definition.is_some();
            InstanceSummary {
                node,
                connected: tree.is_connected(node),
                marker_id: if component { self.markers.assign(tree, node) } else { None },
                attributes: tree.get(node)
                    .and_then(|n| n.as_element())
                    .map(|e| e.attrs.iter().map(|a| (a.name.clone(), a.value.clone())).collect())
                    .unwrap_or_default(),
                label: accessible_label(tree, node),
            }
        });

        Some(ComponentDescription { tag, definition, schema, instance })
    }

    /// First connected component, in document order, whose label contains
    /// `text` (case-insensitive). A container labelled by its text content
    /// only matches when none of its nested components does, since that text
    /// includes theirs. An explicit label attribute always matches.
    pub fn find_by_label(&mut self, page: &Page, text: &str) -> Option<LabelMatch> {
        let query = text.trim();
        if query.is_empty() {
            return None;
        }

        let tree = page.tree();
        let live = page.live_instances();
        let labels: Vec<Option<(String, LabelSource)>> = live.iter()
            .map(|&node| labelled(tree, node).filter(|(label, _)| label_matches(label, query)))
            .collect();

        for (i, &node) in live.iter().enumerate() {
            let Some((label, source)) = &labels[i] else {
                continue;
            };
            let nested_match = *source == LabelSource::Text
                && live[i + 1..].iter()
                    .zip(&labels[i + 1..])
                    .take_while(|(inner, _)| tree.contains(node, **inner))
                    .any(|(_, inner_label)| inner_label.is_some());
            if nested_match {
                continue;
            }
            return Some(LabelMatch {
                node,
                tag: tree.tag_name(node)?.to_string(),
                marker_id: self.markers.assign(tree, node),
                label: label.clone(),
            });
        }
        None
    }

    /// Mark every connected component and draw the overlay, replacing any
    /// previous one. Returns the number of badges drawn. The container and
    /// badge nodes are reused, so repeated calls do not grow the page.
    pub fn enable_visual_markers(&mut self, page: &mut Page) -> usize {
        self.remove_overlay(page);
        self.markers.prune(page.tree());

        let marked: Vec<(MarkerId, NodeId)> = page.live_instances()
            .into_iter()
            .filter_map(|node| self.markers.assign(page.tree(), node).map(|id| (id, node)))
            .collect();

        match self.draw_overlay(page, &marked) {
            Ok(overlay) => {
                self.overlay = Some(overlay);
                tracing::debug!(markers = marked.len(), "visual markers enabled");
                marked.len()
            }
            Err(e) => {
                tracing::warn!("could not draw marker overlay: {}", e);
                0
            }
        }
    }

    /// Remove the overlay and retire every marker
    pub fn disable_visual_markers(&mut self, page: &mut Page) {
        self.remove_overlay(page);
        self.markers.retire_all();
        tracing::debug!("visual markers disabled");
    }

    pub fn markers_enabled(&self) -> bool {
        self.overlay.is_some()
    }

    /// Overlay container, while markers are enabled
    pub fn overlay(&self) -> Option<NodeId> {
        self.overlay
    }

    /// Live marker → node entries
    pub fn get_marker_map(&self, page: &Page) -> BTreeMap<MarkerId, NodeId> {
        self.markers.live(page.tree()).into_iter().collect()
    }

    /// Node behind a marker; `None` once retired or disconnected
    pub fn get_marker_element(&self, page: &Page, id: MarkerId) -> Option<NodeId> {
        self.markers.resolve(page.tree(), id)
    }

    /// Actions for every connected component with a schema, in document order
    pub fn get_mcp_actions(&mut self, page: &Page, catalog: &DescribeCatalog) -> Vec<McpAction> {
        let tree = page.tree();
        let mut actions = Vec::new();
        for node in page.live_instances() {
            let Some(def) = tree.tag_name(node).and_then(|tag| page.registry().get(tag)) else {
                continue;
            };
            let Some(schema) = def.class.as_describable().and_then(|d| d.describe(&def.tag_name, catalog)) else {
                continue;
            };
            let Some(marker) = self.markers.assign(tree, node) else {
                continue;
            };
            actions.extend(derive_actions(&def.tag_name, marker, &schema));
        }
        actions
    }

    fn draw_overlay(&mut self, page: &mut Page, marked: &[(MarkerId, NodeId)]) -> Result<NodeId, DomError> {
        let container = match self.container {
            Some(container) => container,
            None => {
                let container = page.create_element("div");
                page.set_attribute(container, OVERLAY_ATTRIBUTE, "")?;
                page.set_attribute(container, "style", OVERLAY_STYLE)?;
                page.set_attribute(container, "aria-hidden", "true")?;
                self.container = Some(container);
                container
            }
        };

        let previous: Vec<NodeId> = page.tree().children(container).map(|(id, _)| id).collect();
        for badge in previous {
            page.remove(badge)?;
        }

        for (i, (id, node)) in marked.iter().enumerate() {
            let badge = match self.badges.get(i) {
                Some(&badge) => badge,
                None => {
                    let badge = page.create_element("span");
                    page.set_attribute(badge, "class", "au-marker")?;
                    let text = page.create_text("");
                    page.append_child(badge, text)?;
                    self.badges.push(badge);
                    badge
                }
            };
            page.set_attribute(badge, MARKER_ATTRIBUTE, &id.to_string())?;
            page.set_attribute(badge, "data-au-target", &node.index().to_string())?;
            let text = page.tree().children(badge).next().map(|(text, _)| text);
            if let Some(text) = text {
                page.set_text(text, &id.to_string())?;
            }
            page.append_child(container, badge)?;
        }

        let body = page.body();
        page.append_child(body, container)?;
        Ok(container)
    }

    fn remove_overlay(&mut self, page: &mut Page) {
        let mut stale: Vec<NodeId> = page.tree()
            .traverse(page.tree().root())
            .filter(|&id| page.tree().get_attribute(id, OVERLAY_ATTRIBUTE).is_some())
            .collect();
        if let Some(overlay) = self.overlay.take() {
            if !stale.contains(&overlay) {
                stale.push(overlay);
            }
        }
        for node in stale {
            if page.tree().parent(node).is_some() {
                if let Err(e) = page.remove(node) {
                    tracing::warn!(node = %node, "could not remove marker overlay: {}", e);
                }
            }
        }
    }
}

/// Schema of a describable definition, catalog first
fn schema_for(def: &ComponentDefinition, catalog: &DescribeCatalog) -> Option<SchemaEntry> {
    let describable = def.class.as_describable()?;
    Some(describable.describe(&def.tag_name, catalog).unwrap_or_else(|| {
        SchemaEntry::minimal(
            &def.tag_name,
            def.metadata.observed_attributes.iter().map(String::as_str),
        )
    }))
}
