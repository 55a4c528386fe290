//! Accessible labels
//!
//! Best-effort name of an element, in the order a screen reader would pick
//! it: explicit ARIA label, the component's own label attributes, then the
//! visible text.

use agentui_dom::{DomTree, NodeId};

/// Attributes consulted before falling back to text content
pub const LABEL_ATTRIBUTES: &[&str] = &["aria-label", "label", "title", "placeholder"];

/// Where a label was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSource {
    /// One of [`LABEL_ATTRIBUTES`]
    Attribute,
    /// Descendant text, which includes the text of nested components
    Text,
}

/// Label of `node`, `None` when it has nothing readable
pub fn accessible_label(tree: &DomTree, node: NodeId) -> Option<String> {
    labelled(tree, node).map(|(label, _)| label)
}

/// Label of `node` together with its source
pub fn labelled(tree: &DomTree, node: NodeId) -> Option<(String, LabelSource)> {
    for attr in LABEL_ATTRIBUTES {
        if let Some(value) = tree.get_attribute(node, attr) {
            let value = collapse_whitespace(value);
            if !value.is_empty() {
                return Some((value, LabelSource::Attribute));
            }
        }
    }

    let text = collapse_whitespace(&tree.text_content(node));
    (!text.is_empty()).then_some((text, LabelSource::Text))
}

/// Case-insensitive substring match
pub fn label_matches(label: &str, query: &str) -> bool {
    label.to_lowercase().contains(&query.to_lowercase())
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
