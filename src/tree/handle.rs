//! Shared handles into a document arena.

use std::fmt;
use std::rc::Rc;

use super::{Attributes, Document, Element, NodeId, SharedDocument};

/// A shared handle to one node of a document.
///
/// Cloning the handle is cheap and aliases the same node: a change made
/// through one clone is visible through all of them. Two handles compare
/// equal when they point at the same node of the same arena, regardless
/// of content.
///
/// Each method borrows the arena only for its own duration, so handles can
/// be used freely inside closures passed to accessor combinators.
#[derive(Clone)]
pub struct ElementRef {
    doc: SharedDocument,
    id: NodeId,
}

impl ElementRef {
    pub(crate) fn new(doc: SharedDocument, id: NodeId) -> Self {
        Self { doc, id }
    }

    /// Wraps a fresh document whose only top-level element is `element`,
    /// returning a handle to that element.
    #[must_use]
    pub fn from_element(element: &Element) -> Self {
        let mut doc = Document::new();
        let id = doc.import(element);
        doc.append_child(doc.root(), id);
        Self::new(doc.into_shared(), id)
    }

    /// The arena this handle points into.
    #[must_use]
    pub fn document(&self) -> &SharedDocument {
        &self.doc
    }

    /// The node id inside [`document`](Self::document).
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns `true` for the document node of the arena.
    #[must_use]
    pub fn is_document(&self) -> bool {
        self.doc.borrow().root() == self.id
    }

    /// The element name, `None` for the document node.
    #[must_use]
    pub fn name(&self) -> Option<String> {
        self.doc.borrow().node_name(self.id).map(str::to_string)
    }

    /// The element text, `None` if never set.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        self.doc.borrow().node_text(self.id).map(str::to_string)
    }

    /// Replaces the element text in place.
    pub fn set_text(&self, text: Option<String>) {
        self.doc.borrow_mut().set_text(self.id, text);
    }

    /// A copy of the attribute map (empty for the document node).
    #[must_use]
    pub fn attributes(&self) -> Attributes {
        self.doc
            .borrow()
            .attributes(self.id)
            .cloned()
            .unwrap_or_default()
    }

    /// One attribute value.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.doc
            .borrow()
            .attribute(self.id, name)
            .map(str::to_string)
    }

    /// Replaces the whole attribute map in place.
    pub fn set_attributes(&self, attributes: Attributes) {
        self.doc.borrow_mut().set_attributes(self.id, attributes);
    }

    /// Sets one attribute in place.
    pub fn set_attribute(&self, name: impl Into<String>, value: impl Into<String>) {
        self.doc
            .borrow_mut()
            .set_attribute(self.id, name.into(), value.into());
    }

    /// 1-based line of the start tag, for parsed elements.
    #[must_use]
    pub fn line_start(&self) -> Option<u32> {
        self.doc.borrow().node(self.id).line_start
    }

    /// 1-based line of the end tag, for parsed elements.
    #[must_use]
    pub fn line_end(&self) -> Option<u32> {
        self.doc.borrow().node(self.id).line_end
    }

    /// Handles to all child elements, in order.
    #[must_use]
    pub fn children(&self) -> Vec<ElementRef> {
        let ids: Vec<NodeId> = self.doc.borrow().children(self.id).collect();
        self.handles(ids)
    }

    /// Handles to the child elements named `name`, in order.
    #[must_use]
    pub fn children_named(&self, name: &str) -> Vec<ElementRef> {
        let ids = self.doc.borrow().children_named(self.id, name);
        self.handles(ids)
    }

    fn handles(&self, ids: Vec<NodeId>) -> Vec<ElementRef> {
        ids.into_iter()
            .map(|id| Self::new(Rc::clone(&self.doc), id))
            .collect()
    }

    /// Copies `element` into this arena as the last child of this node and
    /// returns a handle to the new child.
    pub fn append(&self, element: &Element) -> ElementRef {
        let mut doc = self.doc.borrow_mut();
        let child = doc.import(element);
        doc.append_child(self.id, child);
        Self::new(Rc::clone(&self.doc), child)
    }

    /// A detached deep copy of this subtree. `None` for the document node.
    #[must_use]
    pub fn to_element(&self) -> Option<Element> {
        self.doc.borrow().export(self.id)
    }
}

impl PartialEq for ElementRef {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.doc, &other.doc) && self.id == other.id
    }
}

impl Eq for ElementRef {}

impl fmt::Debug for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let doc = self.doc.borrow();
        f.debug_struct("ElementRef")
            .field("id", &self.id)
            .field("name", &doc.node_name(self.id))
            .finish()
    }
}
