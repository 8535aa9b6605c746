//! Host ports: what the controller needs from the page it runs in.
//!
//! A browser page provides a document tree, durable key-value storage and a
//! location bar. The controller only talks to these traits, so the same
//! logic drives a real page binding, the in-memory page used in tests and
//! the CLI, or anything else that can answer these calls.

pub mod file;
pub mod memory;

use thiserror::Error;

pub use file::JsonFileStore;
pub use memory::{MemoryDocument, MemoryLocation, MemoryStore};

/// Opaque handle to an element inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// An element that opted into translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatableElement {
    pub node: NodeId,
    /// Value of the translation attribute, i.e. the dictionary key
    pub key: String,
}

/// Errors raised by a [`PreferenceStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("preference storage is unavailable: {0}")]
    Unavailable(String),

    #[error("failed to access preference file: {0}")]
    Io(#[from] std::io::Error),

    #[error("preference file is corrupt: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The document tree of the current page.
pub trait Document: Send + 'static {
    /// Every element carrying `attribute`, in document order.
    fn translatable_elements(&self, attribute: &str) -> Vec<TranslatableElement>;

    /// Replace the text content of an element. Unknown nodes are ignored.
    fn set_text(&mut self, node: NodeId, text: &str);

    /// Set the document-level language (`<html lang>`).
    fn set_document_language(&mut self, code: &str);

    fn body_attribute(&self, name: &str) -> Option<String>;

    fn set_body_attribute(&mut self, name: &str, value: &str);

    fn add_body_class(&mut self, class: &str);

    fn remove_body_class(&mut self, class: &str);

    /// Whether an element with this id exists.
    fn has_element(&self, id: &str) -> bool;

    /// Whether the element `id` has a descendant with class `class`.
    fn has_child_with_class(&self, id: &str, class: &str) -> bool;

    /// Set an attribute on the element `id`. Returns `false` if it is absent.
    fn set_element_attribute(&mut self, id: &str, name: &str, value: &str) -> bool;

    fn add_element_class(&mut self, id: &str, class: &str) -> bool;

    fn remove_element_class(&mut self, id: &str, class: &str) -> bool;
}

/// Durable key-value storage that outlives the page.
pub trait PreferenceStore: Send + 'static {
    fn load(&self, key: &str) -> Option<String>;

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// The page's location.
pub trait Location: Send + 'static {
    /// Path component of the current URL (no query or fragment).
    fn pathname(&self) -> String;

    /// Navigate to `path`. The current page is considered unloaded.
    fn navigate(&mut self, path: &str);
}

/// The three ports of one page, kept together behind a single lock.
#[derive(Debug)]
pub struct Page<D, S, L> {
    pub document: D,
    pub store: S,
    pub location: L,
}

impl<D, S, L> Page<D, S, L>
where
    D: Document,
    S: PreferenceStore,
    L: Location,
{
    pub fn new(document: D, store: S, location: L) -> Self {
        Self {
            document,
            store,
            location,
        }
    }
}
