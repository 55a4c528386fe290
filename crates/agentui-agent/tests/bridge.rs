//! Bridge behavior on a populated page

use agentui_agent::{ActionKind, AgentBridge, DescribeTarget, OVERLAY_ATTRIBUTE};
use agentui_catalog::DescribeCatalog;
use agentui_components::{builtin_class, full_bundle};
use agentui_dom::NodeId;
use agentui_elements::Page;

const CATALOG: &str = r#"{
    "au-button": {
        "description": "Clickable button.\nSupports variants.",
        "attributes": [
            {"name": "variant", "type": "'primary' | 'secondary'", "default": "primary"},
            {"name": "disabled", "type": "boolean"}
        ],
        "methods": [{"name": "focus"}],
        "events": [{"name": "au-click"}]
    },
    "au-card": {
        "description": "Content container"
    },
    "au-input": {
        "description": "Text input",
        "attributes": [{"name": "value", "type": "string"}]
    }
}"#;

fn catalog() -> DescribeCatalog {
    DescribeCatalog::from_json(CATALOG.as_bytes()).unwrap()
}

fn populated() -> (Page, NodeId, NodeId, NodeId) {
    let mut page = Page::new("https://app.test/index.html");
    full_bundle().load_into(&mut page);
    let body = page.body();
    let card = page.append_element(body, "au-card", &[("variant", "outlined")], None).unwrap();
    let wrapper = page.append_element(card, "div", &[], None).unwrap();
    let input = page.append_element(wrapper, "au-input", &[("placeholder", "Email")], None).unwrap();
    let button = page.append_element(card, "au-button", &[], Some("Submit")).unwrap();
    (page, card, input, button)
}

#[test]
fn test_discover_all_counts_describable_only() {
    let bridge = AgentBridge::new();
    let mut page = Page::default();
    assert!(bridge.discover_all(&page, &catalog()).is_empty());

    for tag in ["au-button", "au-card", "au-badge"] {
        page.define(tag, builtin_class(tag).unwrap()).unwrap();
    }
    for tag in ["au-stack", "au-grid"] {
        page.define(tag, builtin_class(tag).unwrap()).unwrap();
    }

    let entries = bridge.discover_all(&page, &catalog());
    let tags: Vec<&str> = entries.keys().map(String::as_str).collect();
    assert_eq!(tags, vec!["au-badge", "au-button", "au-card"]);
    // Missing from the catalog: synthesized from the registry
    assert_eq!(entries["au-badge"].attributes[0].name, "variant");
    assert!(entries["au-badge"].description.is_empty());
}

#[test]
fn test_discover_all_keys_by_tag_not_display_name() {
    let catalog = DescribeCatalog::from_json(
        br#"{"au-button": {"name": "Button", "description": "Clickable button."}}"#,
    ).unwrap();
    let mut page = Page::default();
    page.define("au-button", builtin_class("au-button").unwrap()).unwrap();

    let entries = AgentBridge::new().discover_all(&page, &catalog);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries["au-button"].name, "Button");
    assert_eq!(entries["au-button"].description, "Clickable button.");
}

#[test]
fn test_tree_follows_document_order() {
    let mut page = Page::default();
    full_bundle().load_into(&mut page);
    let body = page.body();
    for tag in ["au-badge", "au-chip", "au-avatar"] {
        page.append_element(body, tag, &[], None).unwrap();
    }

    let mut bridge = AgentBridge::new();
    let tree = bridge.get_component_tree(&page, None, None).unwrap();
    assert_eq!(tree.tag, "body");
    assert_eq!(tree.marker_id, None);
    let tags: Vec<&str> = tree.children.iter().map(|c| c.tag.as_str()).collect();
    assert_eq!(tags, vec!["au-badge", "au-chip", "au-avatar"]);
}

#[test]
fn test_unregistered_elements_are_transparent() {
    let (page, card, input, button) = populated();
    let mut bridge = AgentBridge::new();
    let tree = bridge.get_component_tree(&page, Some(&catalog()), None).unwrap();

    let card_node = &tree.children[0];
    assert_eq!(card_node.node, card);
    assert_eq!(card_node.description.as_deref(), Some("Content container"));
    assert_eq!(card_node.attributes.get("variant").map(String::as_str), Some("outlined"));
    let children: Vec<NodeId> = card_node.children.iter().map(|c| c.node).collect();
    assert_eq!(children, vec![input, button]);
    assert_eq!(tree.find("au-button").unwrap().label.as_deref(), Some("Submit"));

    // Markers are stable across snapshots of the same connection
    let again = bridge.get_component_tree(&page, None, Some(card)).unwrap();
    assert_eq!(again.marker_id, card_node.marker_id);
}

#[test]
fn test_visual_markers_single_overlay() {
    let (mut page, _, _, button) = populated();
    let mut bridge = AgentBridge::new();

    assert_eq!(bridge.enable_visual_markers(&mut page), 3);
    let first = bridge.get_marker_map(&page);
    assert_eq!(bridge.enable_visual_markers(&mut page), 3);

    let overlays: Vec<NodeId> = page.tree().traverse(page.tree().root())
        .filter(|&id| page.tree().get_attribute(id, OVERLAY_ATTRIBUTE).is_some())
        .collect();
    assert_eq!(overlays.len(), 1);
    assert_eq!(page.tree().get_attribute(overlays[0], "aria-hidden"), Some("true"));
    assert!(page.tree().get_attribute(overlays[0], "style").unwrap().contains("pointer-events:none"));
    assert_eq!(bridge.get_marker_map(&page), first);

    let button_marker = first.iter().find(|(_, n)| **n == button).map(|(id, _)| *id).unwrap();
    assert_eq!(bridge.get_marker_element(&page, button_marker), Some(button));

    bridge.disable_visual_markers(&mut page);
    assert!(!bridge.markers_enabled());
    assert!(page.tree().traverse(page.tree().root())
        .all(|id| page.tree().get_attribute(id, OVERLAY_ATTRIBUTE).is_none()));
    assert_eq!(bridge.get_marker_element(&page, button_marker), None);
    assert!(bridge.get_marker_map(&page).is_empty());

    // New markers never reuse retired ids
    bridge.enable_visual_markers(&mut page);
    let last = *first.keys().max().unwrap();
    assert!(bridge.get_marker_map(&page).keys().all(|id| *id > last));
}

#[test]
fn test_marker_invalid_after_reconnect() {
    let (mut page, _, _, button) = populated();
    let mut bridge = AgentBridge::new();
    let found = bridge.find_by_label(&page, "submit").unwrap();
    let marker = found.marker_id.unwrap();

    let body = page.body();
    page.remove(button).unwrap();
    assert_eq!(bridge.get_marker_element(&page, marker), None);
    page.append_child(body, button).unwrap();
    assert_eq!(bridge.get_marker_element(&page, marker), None);

    let refound = bridge.find_by_label(&page, "Submit").unwrap();
    assert_eq!(refound.node, button);
    assert_ne!(refound.marker_id, Some(marker));
}

#[test]
fn test_repeated_markers_reuse_overlay_nodes() {
    let (mut page, card, _, button) = populated();
    let mut bridge = AgentBridge::new();

    bridge.enable_visual_markers(&mut page);
    let nodes = page.tree().len();
    let overlay = bridge.overlay().unwrap();
    for _ in 0..5 {
        bridge.disable_visual_markers(&mut page);
        assert_eq!(bridge.enable_visual_markers(&mut page), 3);
    }
    assert_eq!(page.tree().len(), nodes);
    assert_eq!(bridge.overlay(), Some(overlay));

    // Badges carry the current ids, one per marker
    let map = bridge.get_marker_map(&page);
    let badges: Vec<String> = page.tree().traverse(overlay)
        .filter_map(|id| page.tree().get_attribute(id, "data-au-marker").map(str::to_string))
        .collect();
    let ids: Vec<String> = map.keys().map(|id| id.to_string()).collect();
    assert_eq!(badges, ids);
    assert_eq!(page.tree().text_content(overlay), ids.concat());

    // Fewer components: spare badges leave the overlay
    page.remove(button).unwrap();
    assert_eq!(bridge.enable_visual_markers(&mut page), 2);
    assert_eq!(page.tree().children(overlay).count(), 2);
    assert!(bridge.get_marker_map(&page).values().any(|n| *n == card));
}

#[test]
fn test_find_by_label() {
    let (page, _, input, button) = populated();
    let mut bridge = AgentBridge::new();

    let found = bridge.find_by_label(&page, "Submit").unwrap();
    assert_eq!(found.node, button);
    assert_eq!(found.tag, "au-button");
    assert_eq!(bridge.find_by_label(&page, "email").map(|m| m.node), Some(input));
    assert!(bridge.find_by_label(&page, "Cancel").is_none());
    assert!(bridge.find_by_label(&page, "  ").is_none());

    // The card's text includes "Submit" but the nested button is the match
    assert_ne!(found.node, page.tree().parent(button).unwrap());
}

#[test]
fn test_find_by_label_prefers_explicit_container_label() {
    let mut page = Page::default();
    full_bundle().load_into(&mut page);
    let body = page.body();
    let card = page.append_element(body, "au-card", &[("aria-label", "Submit order")], None).unwrap();
    page.append_element(card, "au-button", &[], Some("Submit")).unwrap();

    let mut bridge = AgentBridge::new();
    let found = bridge.find_by_label(&page, "submit").unwrap();
    assert_eq!(found.node, card);
    assert_eq!(found.label, "Submit order");
}

#[test]
fn test_describe_tag_and_node() {
    let (page, _, _, button) = populated();
    let mut bridge = AgentBridge::new();
    let catalog = catalog();

    let by_tag = bridge.describe(&page, Some(&catalog), "au-button").unwrap();
    assert_eq!(by_tag.definition.as_ref().unwrap().base_class, "AgentUIElement");
    assert_eq!(by_tag.schema.as_ref().unwrap().summary(), "Clickable button.");
    assert!(by_tag.instance.is_none());

    let by_node = bridge.describe(&page, Some(&catalog), button).unwrap();
    let instance = by_node.instance.unwrap();
    assert!(instance.connected);
    assert!(instance.marker_id.is_some());
    assert_eq!(instance.label.as_deref(), Some("Submit"));

    assert!(bridge.describe(&page, Some(&catalog), "au-missing").is_none());
    assert!(bridge.describe(&page, None, DescribeTarget::Node(page.body())).is_none());

    // Layout primitives are registered but not describable
    let stack = bridge.describe(&page, Some(&catalog), "au-stack").unwrap();
    assert!(stack.schema.is_none());
    assert!(!stack.definition.unwrap().describable);
}

#[test]
fn test_mcp_actions() {
    let (page, _, _, button) = populated();
    let mut bridge = AgentBridge::new();
    let actions = bridge.get_mcp_actions(&page, &catalog());

    let button_actions: Vec<_> = actions.iter().filter(|a| a.tag == "au-button").collect();
    let kinds: Vec<ActionKind> = button_actions.iter().map(|a| a.kind).collect();
    assert_eq!(kinds, vec![
        ActionKind::Call,
        ActionKind::Dispatch,
        ActionKind::SetAttribute,
        ActionKind::SetAttribute,
    ]);
    let target = button_actions[0].target;
    assert_eq!(bridge.get_marker_element(&page, target), Some(button));

    // Card has a catalog entry without members, input one attribute
    assert_eq!(actions.iter().filter(|a| a.tag == "au-input").count(), 1);
    assert_eq!(actions.iter().filter(|a| a.tag == "au-card").count(), 0);
}

#[test]
fn test_serialized_field_names() {
    let (page, _, _, _) = populated();
    let mut bridge = AgentBridge::new();
    let tree = bridge.get_component_tree(&page, Some(&catalog()), None).unwrap();
    let json = serde_json::to_value(&tree).unwrap();

    let card = &json["children"][0];
    assert!(card["markerId"].is_number());
    assert!(card["node"].is_number());
    assert_eq!(card["tag"], "au-card");
    assert!(json["markerId"].is_null());
}
