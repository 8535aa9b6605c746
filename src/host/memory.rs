//! In-memory page: a flat element list standing in for the DOM.
//!
//! Used by the test suite and by the CLI preview. Every write through the
//! [`Document`] port bumps a mutation counter so callers can assert that an
//! operation left the page untouched.

use super::{Document, Location, NodeId, PreferenceStore, StoreError, TranslatableElement};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// One element of a [`MemoryDocument`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryElement {
    pub id: Option<String>,
    pub parent: Option<NodeId>,
    pub attributes: BTreeMap<String, String>,
    pub classes: BTreeSet<String>,
    pub text: String,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    elements: Vec<MemoryElement>,
    document_language: Option<String>,
    body_attributes: BTreeMap<String, String>,
    body_classes: BTreeSet<String>,
    mutations: usize,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element and return its handle.
    pub fn push(&mut self, element: MemoryElement) -> NodeId {
        self.elements.push(element);
        NodeId(self.elements.len() - 1)
    }

    /// Append an element tagged with `attribute="key"` showing `text`.
    pub fn push_translatable(&mut self, attribute: &str, key: &str, text: &str) -> NodeId {
        let mut element = MemoryElement {
            text: text.to_string(),
            ..MemoryElement::default()
        };
        element
            .attributes
            .insert(attribute.to_string(), key.to_string());
        self.push(element)
    }

    /// Append the language switch (`id`) with its slider child.
    pub fn push_switch(&mut self, id: &str, slider_class: &str) -> NodeId {
        let switch = self.push(MemoryElement {
            id: Some(id.to_string()),
            ..MemoryElement::default()
        });
        self.push(MemoryElement {
            parent: Some(switch),
            classes: BTreeSet::from([slider_class.to_string()]),
            ..MemoryElement::default()
        });
        switch
    }

    pub fn with_body_attribute(mut self, name: &str, value: &str) -> Self {
        self.body_attributes
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.elements.get(node.0).map(|element| element.text.as_str())
    }

    pub fn document_language(&self) -> Option<&str> {
        self.document_language.as_deref()
    }

    pub fn body_has_class(&self, class: &str) -> bool {
        self.body_classes.contains(class)
    }

    pub fn element_attribute(&self, id: &str, name: &str) -> Option<&str> {
        self.find(id)
            .and_then(|node| self.elements[node.0].attributes.get(name))
            .map(String::as_str)
    }

    pub fn element_has_class(&self, id: &str, class: &str) -> bool {
        self.find(id)
            .is_some_and(|node| self.elements[node.0].classes.contains(class))
    }

    /// Number of writes made through the [`Document`] port.
    pub fn mutations(&self) -> usize {
        self.mutations
    }

    fn find(&self, id: &str) -> Option<NodeId> {
        self.elements
            .iter()
            .position(|element| element.id.as_deref() == Some(id))
            .map(NodeId)
    }

    fn is_descendant_of(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = self.elements[node.0].parent;
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.elements.get(parent.0).and_then(|e| e.parent);
        }
        false
    }

    fn with_element(&mut self, id: &str, f: impl FnOnce(&mut MemoryElement)) -> bool {
        match self.find(id) {
            Some(node) => {
                f(&mut self.elements[node.0]);
                self.mutations += 1;
                true
            }
            None => false,
        }
    }
}

impl Document for MemoryDocument {
    fn translatable_elements(&self, attribute: &str) -> Vec<TranslatableElement> {
        self.elements
            .iter()
            .enumerate()
            .filter_map(|(idx, element)| {
                element.attributes.get(attribute).map(|key| TranslatableElement {
                    node: NodeId(idx),
                    key: key.clone(),
                })
            })
            .collect()
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(element) = self.elements.get_mut(node.0) {
            element.text = text.to_string();
            self.mutations += 1;
        }
    }

    fn set_document_language(&mut self, code: &str) {
        self.document_language = Some(code.to_string());
        self.mutations += 1;
    }

    fn body_attribute(&self, name: &str) -> Option<String> {
        self.body_attributes.get(name).cloned()
    }

    fn set_body_attribute(&mut self, name: &str, value: &str) {
        self.body_attributes
            .insert(name.to_string(), value.to_string());
        self.mutations += 1;
    }

    fn add_body_class(&mut self, class: &str) {
        self.body_classes.insert(class.to_string());
        self.mutations += 1;
    }

    fn remove_body_class(&mut self, class: &str) {
        self.body_classes.remove(class);
        self.mutations += 1;
    }

    fn has_element(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    fn has_child_with_class(&self, id: &str, class: &str) -> bool {
        let Some(ancestor) = self.find(id) else {
            return false;
        };
        self.elements.iter().enumerate().any(|(idx, element)| {
            element.classes.contains(class) && self.is_descendant_of(NodeId(idx), ancestor)
        })
    }

    fn set_element_attribute(&mut self, id: &str, name: &str, value: &str) -> bool {
        self.with_element(id, |element| {
            element
                .attributes
                .insert(name.to_string(), value.to_string());
        })
    }

    fn add_element_class(&mut self, id: &str, class: &str) -> bool {
        self.with_element(id, |element| {
            element.classes.insert(class.to_string());
        })
    }

    fn remove_element_class(&mut self, id: &str, class: &str) -> bool {
        self.with_element(id, |element| {
            element.classes.remove(class);
        })
    }
}

/// Preference storage kept in a map, with a switch to simulate a browser
/// that refuses writes (private mode, quota exceeded).
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    writes: usize,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    /// A store whose writes always fail.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Number of successful writes.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.unavailable {
            return Err(StoreError::Unavailable("writes are disabled".to_string()));
        }
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// Location that records navigations instead of performing them.
#[derive(Debug, Clone, Default)]
pub struct MemoryLocation {
    path: String,
    navigations: Vec<String>,
}

impl MemoryLocation {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            navigations: Vec::new(),
        }
    }

    /// Every path navigated to, oldest first.
    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }
}

impl Location for MemoryLocation {
    fn pathname(&self) -> String {
        self.path.clone()
    }

    fn navigate(&mut self, path: &str) {
        self.navigations.push(path.to_string());
        self.path = path.to_string();
    }
}
