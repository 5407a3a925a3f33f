//! In-memory DOM
//!
//! A small node tree implementing [`FormDom`], for tests and for hosts
//! without a browser.

use crate::config::FormConfig;
use crate::dom::FormDom;
use crate::error::FormError;
use std::cell::RefCell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Default)]
struct Node {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    text: String,
    value: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug)]
pub struct MemoryDom {
    nodes: RefCell<Vec<Node>>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    /// Empty document with a `body` root
    pub fn new() -> Self {
        let body = Node {
            tag: "body".to_string(),
            ..Node::default()
        };
        Self {
            nodes: RefCell::new(vec![body]),
        }
    }

    /// Document laid out like the application form: one `div` per field
    /// holding a `textarea` and a `small` counter, all inside the form.
    pub fn application_form(config: &FormConfig) -> Self {
        let dom = Self::new();
        let form = dom.append(dom.root(), "form", Some(&config.form_id));
        for field_id in &config.field_ids {
            let group = dom.append(form, "div", None);
            dom.append(group, "textarea", Some(field_id));
            dom.append(group, "small", Some(&config.counter_id(field_id)));
        }
        dom
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a new element under `parent`
    pub fn append(&self, parent: NodeId, tag: &str, id: Option<&str>) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        let node_id = NodeId(nodes.len());
        nodes.push(Node {
            tag: tag.to_string(),
            id: id.map(str::to_string),
            parent: Some(parent),
            ..Node::default()
        });
        nodes[parent.0].children.push(node_id);
        node_id
    }

    /// Set the value of the element with `id`; returns false if not found
    pub fn set_value(&self, id: &str, value: &str) -> bool {
        match self.element_by_id(id) {
            Some(node) => {
                self.nodes.borrow_mut()[node.0].value = value.to_string();
                true
            }
            None => false,
        }
    }

    pub fn text(&self, node: NodeId) -> String {
        self.nodes.borrow()[node.0].text.clone()
    }

    pub fn tag(&self, node: NodeId) -> String {
        self.nodes.borrow()[node.0].tag.clone()
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes.borrow()[node.0]
            .classes
            .iter()
            .any(|c| c == class)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.borrow()[node.0].parent
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes.borrow()[node.0].children.clone()
    }

    /// Text of every `<tag class=..>` child of the parent of element `id`
    pub fn sibling_texts(&self, id: &str, tag: &str, class: &str) -> Vec<String> {
        let Some(parent) = self.element_by_id(id).and_then(|n| self.parent(n)) else {
            return Vec::new();
        };
        self.children(parent)
            .into_iter()
            .filter(|&child| self.tag(child) == tag && self.has_class(child, class))
            .map(|child| self.text(child))
            .collect()
    }

    /// Detach `id` from the tree, simulating a page that lacks it
    pub fn remove_by_id(&self, id: &str) -> bool {
        match self.element_by_id(id) {
            Some(node) => {
                self.remove(&node);
                self.nodes.borrow_mut()[node.0].id = None;
                true
            }
            None => false,
        }
    }

    fn is_attached(nodes: &[Node], mut node: NodeId) -> bool {
        while let Some(parent) = nodes[node.0].parent {
            node = parent;
        }
        node.0 == 0
    }
}

impl FormDom for MemoryDom {
    type Element = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let nodes = self.nodes.borrow();
        (0..nodes.len())
            .map(NodeId)
            .find(|&node| {
                nodes[node.0].id.as_deref() == Some(id) && Self::is_attached(&nodes, node)
            })
    }

    fn value(&self, element: &NodeId) -> String {
        self.nodes.borrow()[element.0].value.clone()
    }

    fn set_text(&self, element: &NodeId, text: &str) {
        let mut nodes = self.nodes.borrow_mut();
        nodes[element.0].text = text.to_string();
        // Setting textContent replaces all children
        for child in std::mem::take(&mut nodes[element.0].children) {
            nodes[child.0].parent = None;
        }
    }

    fn toggle_class(&self, element: &NodeId, class: &str, present: bool) -> Result<(), FormError> {
        let mut nodes = self.nodes.borrow_mut();
        let classes = &mut nodes[element.0].classes;
        let has = classes.iter().any(|c| c == class);
        if present && !has {
            classes.push(class.to_string());
        } else if !present && has {
            classes.retain(|c| c != class);
        }
        Ok(())
    }

    fn append_annotation(
        &self,
        field: &NodeId,
        tag: &str,
        class: &str,
        text: &str,
    ) -> Result<NodeId, FormError> {
        let parent = self
            .parent(*field)
            .ok_or_else(|| FormError::Dom("field has no parent node".to_string()))?;
        let node = self.append(parent, tag, None);
        let mut nodes = self.nodes.borrow_mut();
        nodes[node.0].classes.push(class.to_string());
        nodes[node.0].text = text.to_string();
        Ok(node)
    }

    fn remove(&self, element: &NodeId) {
        let mut nodes = self.nodes.borrow_mut();
        if let Some(parent) = nodes[element.0].parent.take() {
            nodes[parent.0].children.retain(|&child| child != *element);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_form_layout() {
        let dom = MemoryDom::application_form(&FormConfig::default());
        let form = dom.element_by_id("application-form").unwrap();
        assert_eq!(dom.children(form).len(), 3);

        let essay = dom.element_by_id("essay1").unwrap();
        let counter = dom.element_by_id("essay1-counter").unwrap();
        assert_eq!(dom.parent(essay), dom.parent(counter));
        assert_eq!(dom.tag(essay), "textarea");
    }

    #[test]
    fn test_set_value() {
        let dom = MemoryDom::application_form(&FormConfig::default());
        assert!(dom.set_value("essay2", "hello"));
        let essay = dom.element_by_id("essay2").unwrap();
        assert_eq!(dom.value(&essay), "hello");
        assert!(!dom.set_value("essay9", "nope"));
    }

    #[test]
    fn test_toggle_class_idempotent() {
        let dom = MemoryDom::new();
        let node = dom.append(dom.root(), "small", Some("c"));
        dom.toggle_class(&node, "x", true).unwrap();
        dom.toggle_class(&node, "x", true).unwrap();
        assert!(dom.has_class(node, "x"));
        dom.toggle_class(&node, "x", false).unwrap();
        assert!(!dom.has_class(node, "x"));
    }

    #[test]
    fn test_annotation_appended_last() {
        let dom = MemoryDom::application_form(&FormConfig::default());
        let essay = dom.element_by_id("essay1").unwrap();
        let span = dom
            .append_annotation(&essay, "span", "text-danger", "bad")
            .unwrap();
        let parent = dom.parent(essay).unwrap();
        assert_eq!(dom.children(parent).last(), Some(&span));
        assert_eq!(dom.sibling_texts("essay1", "span", "text-danger"), vec!["bad"]);
    }

    #[test]
    fn test_annotation_without_parent_fails() {
        let dom = MemoryDom::new();
        let root = dom.root();
        assert!(dom.append_annotation(&root, "span", "e", "x").is_err());
    }

    #[test]
    fn test_removed_elements_are_not_found() {
        let dom = MemoryDom::application_form(&FormConfig::default());
        assert!(dom.remove_by_id("essay3-counter"));
        assert!(dom.element_by_id("essay3-counter").is_none());
        assert!(dom.element_by_id("essay3").is_some());
    }
}
