//! Document - High-level document API

use crate::{DomTree, NodeId};

/// HTML Document
#[derive(Debug)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create a new document with html/head/body
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        // Freshly created nodes, the inserts cannot fail
        let _ = tree.append_child(tree.root(), html);
        let _ = tree.append_child(html, head);
        let _ = tree.append_child(html, body);
        tree.take_mutations();

        Self {
            tree,
            url: url.to_string(),
            html_element: html,
            head_element: head,
            body_element: body,
        }
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Get document title
    pub fn title(&self) -> String {
        self.tree.children(self.head_element)
            .find(|(id, _)| self.tree.tag_name(*id) == Some("title"))
            .map(|(id, _)| self.tree.text_content(id))
            .unwrap_or_default()
    }

    /// Add a `<script src>` to the head, as a bundle loader would
    pub fn add_script(&mut self, src: &str) -> NodeId {
        let script = self.tree.create_element("script");
        let _ = self.tree.set_attribute(script, "src", src);
        let _ = self.tree.append_child(self.head_element, script);
        script
    }

    /// `src` of every connected script element, in document order
    pub fn script_sources(&self) -> Vec<String> {
        self.tree.traverse(self.tree.root())
            .filter(|id| self.tree.tag_name(*id) == Some("script"))
            .filter_map(|id| self.tree.get_attribute(id, "src").map(str::to_string))
            .collect()
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree.traverse(self.tree.root())
            .find(|node| self.tree.get_attribute(*node, "id") == Some(id))
    }

    /// Connected elements with the given tag, in document order
    pub fn get_elements_by_tag_name(&self, tag: &str) -> Vec<NodeId> {
        let tag = tag.to_ascii_lowercase();
        self.tree.traverse(self.tree.root())
            .filter(|id| self.tree.tag_name(*id) == Some(tag.as_str()))
            .collect()
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_structure() {
        let doc = Document::new("https://example.com/app/");
        assert_eq!(doc.url(), "https://example.com/app/");
        assert!(doc.tree.is_connected(doc.body()));
        assert_eq!(doc.tree.parent(doc.head()), Some(doc.document_element()));
    }

    #[test]
    fn test_script_sources_in_order() {
        let mut doc = Document::default();
        doc.add_script("/vendor/other.js");
        doc.add_script("/lib/agentui.js");
        assert_eq!(doc.script_sources(), vec!["/vendor/other.js", "/lib/agentui.js"]);
    }

    #[test]
    fn test_title() {
        let mut doc = Document::default();
        let title = doc.tree.create_element("title");
        let text = doc.tree.create_text("Docs");
        doc.tree.append_child(title, text).unwrap();
        doc.tree.append_child(doc.head(), title).unwrap();
        assert_eq!(doc.title(), "Docs");
    }
}
