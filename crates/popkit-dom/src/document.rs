//! Document - High-level document API

use std::cell::Cell;
use std::rc::Rc;

use crate::{DomError, DomTree, EventCategory, NodeId};

/// Native listener slots on the document root, one per event category
///
/// Tracks whether a listener is attached for each category, plus running
/// attach/detach totals so callers can verify that listener count does not
/// grow with subscriber count.
#[derive(Debug, Default)]
pub struct RootListeners {
    attached: [Cell<bool>; 5],
    attaches: Cell<usize>,
    detaches: Cell<usize>,
}

impl RootListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the native listener for `category`; false if already attached
    pub fn attach(&self, category: EventCategory) -> bool {
        let slot = &self.attached[category.index()];
        if slot.replace(true) {
            return false;
        }
        self.attaches.set(self.attaches.get() + 1);
        tracing::debug!("Attached root listener: {}", category);
        true
    }

    /// Detach the native listener for `category`; false if none attached
    pub fn detach(&self, category: EventCategory) -> bool {
        let slot = &self.attached[category.index()];
        if !slot.replace(false) {
            return false;
        }
        self.detaches.set(self.detaches.get() + 1);
        tracing::debug!("Detached root listener: {}", category);
        true
    }

    /// Check whether a native listener is attached for `category`
    pub fn is_attached(&self, category: EventCategory) -> bool {
        self.attached[category.index()].get()
    }

    /// Number of categories with an attached listener
    pub fn attached_count(&self) -> usize {
        self.attached.iter().filter(|c| c.get()).count()
    }

    /// Total attach operations performed
    pub fn total_attaches(&self) -> usize {
        self.attaches.get()
    }

    /// Total detach operations performed
    pub fn total_detaches(&self) -> usize {
        self.detaches.get()
    }
}

/// HTML Document
#[derive(Debug)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    html_element: NodeId,
    body_element: NodeId,
    listeners: Rc<RootListeners>,
}

impl Document {
    /// Create a document with an `<html><body>` skeleton
    pub fn new() -> Self {
        let mut tree = DomTree::new();
        let html = tree.create_element("html");
        let body = tree.create_element("body");
        let root = tree.root();
        // Freshly created nodes under the document cannot form a cycle
        let _ = tree.append_child(root, html);
        let _ = tree.append_child(html, body);

        Self {
            tree,
            html_element: html,
            body_element: body,
            listeners: Rc::new(RootListeners::new()),
        }
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Create an element and append it to `parent`
    pub fn append_element(&mut self, parent: NodeId, tag: &str, id: Option<&str>) -> Result<NodeId, DomError> {
        let el = self.tree.create_element(tag);
        if id.is_some() {
            self.tree.set_id(el, id)?;
        }
        self.tree.append_child(parent, el)?;
        Ok(el)
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree.get_element_by_id(id)
    }

    /// Native listener slots on the root
    pub fn root_listeners(&self) -> Rc<RootListeners> {
        Rc::clone(&self.listeners)
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
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_skeleton() {
        let doc = Document::new();
        assert_eq!(doc.tree().parent(doc.body()), Some(doc.document_element()));
        assert_eq!(doc.tree().parent(doc.document_element()), Some(NodeId::ROOT));
    }

    #[test]
    fn test_append_element_with_id() {
        let mut doc = Document::new();
        let body = doc.body();
        let el = doc.append_element(body, "button", Some("trigger")).unwrap();
        assert_eq!(doc.get_element_by_id("trigger"), Some(el));
    }

    #[test]
    fn test_root_listener_attach_idempotent() {
        let listeners = RootListeners::new();
        assert!(listeners.attach(EventCategory::Click));
        assert!(!listeners.attach(EventCategory::Click));
        assert_eq!(listeners.attached_count(), 1);
        assert_eq!(listeners.total_attaches(), 1);

        assert!(listeners.detach(EventCategory::Click));
        assert!(!listeners.detach(EventCategory::Click));
        assert_eq!(listeners.total_detaches(), 1);
        assert!(!listeners.is_attached(EventCategory::Click));
    }
}
