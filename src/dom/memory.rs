//! In-memory [`Document`] used by tests and offline rendering.

use std::collections::BTreeMap;

use super::{
    Document,
    ElementId,
    SelectOption,
};

#[derive(Debug, Clone, Default)]
struct Node {
    tag: String,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    text: String,
    options: Vec<SelectOption>,
    /// Index into `options`.
    selected: Option<usize>,
}

/// Flat list of elements in document order.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    nodes: Vec<Node>,
    root_attributes: BTreeMap<String, String>,
}

impl MemoryDocument {
    /// Empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element after every existing one.
    pub fn append(&mut self, tag: &str) -> ElementId {
        self.append_with(tag, &[])
    }

    /// Append an element with attributes. `class` is split into classes.
    pub fn append_with(&mut self, tag: &str, attributes: &[(&str, &str)]) -> ElementId {
        let mut node = Node { tag: tag.to_ascii_lowercase(), ..Node::default() };
        for (name, value) in attributes {
            if *name == "class" {
                node.classes.extend(value.split_whitespace().map(str::to_string));
            } else {
                node.attributes.insert((*name).to_string(), (*value).to_string());
            }
        }
        self.nodes.push(node);
        ElementId::new(self.nodes.len() - 1)
    }

    /// Classes of an element in insertion order.
    #[must_use]
    pub fn classes(&self, element: ElementId) -> &[String] {
        self.node(element).map(|node| node.classes.as_slice()).unwrap_or_default()
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if no element was appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node behind `element`, `None` if unknown.
    fn node(&self, element: ElementId) -> Option<&Node> {
        self.nodes.get(element.index())
    }

    /// Mutable node behind `element`, `None` if unknown.
    fn node_mut(&mut self, element: ElementId) -> Option<&mut Node> {
        self.nodes.get_mut(element.index())
    }

    /// Ids of matching nodes in document order.
    fn find(&self, predicate: impl Fn(&Node) -> bool) -> Vec<ElementId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| predicate(node))
            .map(|(index, _)| ElementId::new(index))
            .collect()
    }
}

impl Document for MemoryDocument {
    fn elements_with_attribute(&self, name: &str) -> Vec<ElementId> {
        self.find(|node| node.attributes.contains_key(name))
    }

    fn elements_with_tag(&self, tag: &str) -> Vec<ElementId> {
        self.find(|node| node.tag.eq_ignore_ascii_case(tag))
    }

    fn elements_with_class(&self, class: &str) -> Vec<ElementId> {
        self.find(|node| node.classes.iter().any(|c| c == class))
    }

    fn element_by_id(&self, id: &str) -> Option<ElementId> {
        self.find(|node| node.attributes.get("id").is_some_and(|v| v == id)).into_iter().next()
    }

    fn tag_name(&self, element: ElementId) -> Option<&str> {
        self.node(element).map(|node| node.tag.as_str())
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<&str> {
        self.node(element)?.attributes.get(name).map(String::as_str)
    }

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        if let Some(node) = self.node_mut(element) {
            node.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn text_content(&self, element: ElementId) -> Option<&str> {
        self.node(element).map(|node| node.text.as_str())
    }

    fn set_text_content(&mut self, element: ElementId, text: &str) {
        if let Some(node) = self.node_mut(element) {
            node.text = text.to_string();
        }
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.node(element).is_some_and(|node| node.classes.iter().any(|c| c == class))
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        if let Some(node) = self.node_mut(element)
            && !node.classes.iter().any(|c| c == class)
        {
            node.classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, element: ElementId, class: &str) {
        if let Some(node) = self.node_mut(element) {
            node.classes.retain(|c| c != class);
        }
    }

    fn options(&self, element: ElementId) -> &[SelectOption] {
        self.node(element).map(|node| node.options.as_slice()).unwrap_or_default()
    }

    fn replace_options(&mut self, element: ElementId, options: Vec<SelectOption>) {
        if let Some(node) = self.node_mut(element) {
            node.selected = if options.is_empty() { None } else { Some(0) };
            node.options = options;
        }
    }

    fn selected_value(&self, element: ElementId) -> Option<&str> {
        let node = self.node(element)?;
        node.options.get(node.selected?).map(|option| option.value.as_str())
    }

    fn select_value(&mut self, element: ElementId, value: &str) -> bool {
        let Some(node) = self.node_mut(element) else {
            return false;
        };
        node.selected = node.options.iter().position(|option| option.value == value);
        node.selected.is_some()
    }

    fn document_attribute(&self, name: &str) -> Option<&str> {
        self.root_attributes.get(name).map(String::as_str)
    }

    fn set_document_attribute(&mut self, name: &str, value: &str) {
        self.root_attributes.insert(name.to_string(), value.to_string());
    }
}
