//! Arena-based XML document tree.
//!
//! All nodes live in a contiguous `Vec<NodeData>` owned by the `Document`,
//! and are referenced by `NodeId`, a newtype over `NonZeroU32`. Navigation
//! links (parent, first\_child, last\_child, next\_sibling, prev\_sibling)
//! are arena indices, so there are no reference cycles and no per-node
//! allocation.
//!
//! A parsed or constructed tree is shared as `Rc<RefCell<Document>>`
//! ([`SharedDocument`]). [`ElementRef`] pairs that shared arena with a
//! `NodeId`; every handle to the same node observes the same mutations.
//! [`Element`] is the owned, detached form used to write literal trees in
//! code and to move subtrees between arenas.

mod element;
mod handle;
mod node;

pub use element::Element;
pub use handle::ElementRef;
pub use node::NodeKind;

use std::cell::RefCell;
use std::num::NonZeroU32;
use std::rc::Rc;

use indexmap::IndexMap;

/// Ordered attribute map. Iteration order is insertion order, which is the
/// order the serializer writes attributes in.
pub type Attributes = IndexMap<String, String>;

/// A document arena shared between every handle into it.
pub type SharedDocument = Rc<RefCell<Document>>;

/// A typed index into the document's node arena.
///
/// `NodeId` is a newtype over `NonZeroU32`, meaning it can never be zero
/// and `Option<NodeId>` has the same size as `NodeId` (niche optimization).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NodeId(NonZeroU32);

impl NodeId {
    /// Creates a `NodeId` from a raw index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is 0 or does not fit in a `u32`.
    #[allow(clippy::expect_used)]
    fn from_index(index: usize) -> Self {
        let raw = u32::try_from(index).expect("document arena exceeds u32::MAX nodes");
        Self(NonZeroU32::new(raw).expect("NodeId index must be non-zero"))
    }

    /// Returns the raw index as a `usize` for indexing into the arena.
    fn as_index(self) -> usize {
        self.0.get() as usize
    }
}

/// Storage for a single node in the document arena.
#[derive(Debug, Clone)]
pub struct NodeData {
    /// What kind of node this is and its payload.
    pub kind: NodeKind,
    /// 1-based line of the start tag, set by the tree builder.
    pub line_start: Option<u32>,
    /// 1-based line of the end tag, set by the tree builder.
    pub line_end: Option<u32>,
    /// Parent node, if any. The document node has no parent.
    pub parent: Option<NodeId>,
    /// First child node.
    pub first_child: Option<NodeId>,
    /// Last child node (for O(1) append).
    pub last_child: Option<NodeId>,
    /// Next sibling.
    pub next_sibling: Option<NodeId>,
}

impl NodeData {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            line_start: None,
            line_end: None,
            parent: None,
            first_child: None,
            last_child: None,
            next_sibling: None,
        }
    }
}

/// An XML document arena.
///
/// The `Document` owns all nodes and provides navigation through `&self`
/// and mutation through `&mut self`. Handles that outlive a borrow go
/// through [`SharedDocument`] and [`ElementRef`].
#[derive(Debug)]
pub struct Document {
    /// The node arena. Index 0 is unused (placeholder for `NonZeroU32`).
    nodes: Vec<NodeData>,
    /// The document node id.
    root: NodeId,
}

impl Document {
    /// Creates a new document containing only the document node.
    #[must_use]
    pub fn new() -> Self {
        let mut nodes = Vec::with_capacity(64);
        // Index 0: placeholder (NodeId uses NonZeroU32)
        nodes.push(NodeData::new(NodeKind::Document));
        // Index 1: the document node
        nodes.push(NodeData::new(NodeKind::Document));
        Self {
            nodes,
            root: NodeId::from_index(1),
        }
    }

    /// Wraps the document for sharing between handles.
    #[must_use]
    pub fn into_shared(self) -> SharedDocument {
        Rc::new(RefCell::new(self))
    }

    /// Returns the document node id.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns a reference to the `NodeData` for the given node.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not refer to a node of this arena.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.as_index()]
    }

    /// Returns a mutable reference to the `NodeData` for the given node.
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.as_index()]
    }

    /// Returns the name of an element node, `None` for the document node.
    #[must_use]
    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Element { name, .. } => Some(name),
            NodeKind::Document => None,
        }
    }

    /// Returns the text of an element node.
    #[must_use]
    pub fn node_text(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Element { text, .. } => text.as_deref(),
            NodeKind::Document => None,
        }
    }

    /// Returns the attributes of an element node, `None` for the document node.
    #[must_use]
    pub fn attributes(&self, id: NodeId) -> Option<&Attributes> {
        match &self.node(id).kind {
            NodeKind::Element { attributes, .. } => Some(attributes),
            NodeKind::Document => None,
        }
    }

    /// Returns the value of an attribute by name on an element node.
    #[must_use]
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.attributes(id)?.get(name).map(String::as_str)
    }

    // --- Navigation ---

    /// Returns an iterator over the children of a node.
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            doc: self,
            next: self.node(id).first_child,
        }
    }

    /// Returns the children of `id` whose name equals `name`, in order.
    #[must_use]
    pub fn children_named(&self, id: NodeId, name: &str) -> Vec<NodeId> {
        self.children(id)
            .filter(|&child| self.node_name(child) == Some(name))
            .collect()
    }

    // --- Mutation ---

    /// Allocates a new node in the arena and returns its `NodeId`.
    pub fn create_node(&mut self, kind: NodeKind) -> NodeId {
        let index = self.nodes.len();
        self.nodes.push(NodeData::new(kind));
        NodeId::from_index(index)
    }

    /// Appends a child node to the end of a parent's child list.
    ///
    /// The child must not already have a parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(
            self.node(child).parent.is_none(),
            "child already has a parent"
        );

        self.node_mut(child).parent = Some(parent);

        if let Some(last) = self.node(parent).last_child {
            self.node_mut(last).next_sibling = Some(child);
        } else {
            self.node_mut(parent).first_child = Some(child);
        }
        self.node_mut(parent).last_child = Some(child);
    }

    /// Replaces the text of an element node. No-op on the document node.
    pub fn set_text(&mut self, id: NodeId, value: Option<String>) {
        if let NodeKind::Element { text, .. } = &mut self.node_mut(id).kind {
            *text = value;
        }
    }

    /// Replaces all attributes of an element node. No-op on the document node.
    pub fn set_attributes(&mut self, id: NodeId, value: Attributes) {
        if let NodeKind::Element { attributes, .. } = &mut self.node_mut(id).kind {
            *attributes = value;
        }
    }

    /// Sets one attribute of an element node, keeping its position if it
    /// already exists. No-op on the document node.
    pub fn set_attribute(&mut self, id: NodeId, name: String, value: String) {
        if let NodeKind::Element { attributes, .. } = &mut self.node_mut(id).kind {
            attributes.insert(name, value);
        }
    }

    /// Copies an owned [`Element`] subtree into the arena and returns the id
    /// of its top node. The new node has no parent yet.
    pub fn import(&mut self, element: &Element) -> NodeId {
        let top = self.create_from(element);
        let mut pending = vec![(top, element)];
        while let Some((parent, source)) = pending.pop() {
            for child in &source.children {
                let id = self.create_from(child);
                self.append_child(parent, id);
                pending.push((id, child));
            }
        }
        top
    }

    fn create_from(&mut self, element: &Element) -> NodeId {
        let id = self.create_node(NodeKind::Element {
            name: element.name.clone(),
            text: element.text.clone(),
            attributes: element.attributes.clone(),
        });
        let data = self.node_mut(id);
        data.line_start = element.line_start;
        data.line_end = element.line_end;
        id
    }

    /// Copies the subtree rooted at `id` out of the arena as an owned
    /// [`Element`]. Returns `None` for the document node.
    #[must_use]
    pub fn export(&self, id: NodeId) -> Option<Element> {
        let top = self.detached(id)?;
        // Children are collected bottom-up: each frame holds the element
        // being filled and the arena ids still to visit.
        let mut frames: Vec<(Element, Vec<NodeId>)> = Vec::new();
        let mut child_ids: Vec<NodeId> = self.children(id).collect();
        child_ids.reverse();
        let mut current = (top, child_ids);
        loop {
            if let Some(next) = current.1.pop() {
                let Some(element) = self.detached(next) else {
                    continue;
                };
                let mut grandchildren: Vec<NodeId> = self.children(next).collect();
                grandchildren.reverse();
                frames.push(current);
                current = (element, grandchildren);
            } else {
                let Some(mut parent) = frames.pop() else {
                    return Some(current.0);
                };
                parent.0.children.push(current.0);
                current = parent;
            }
        }
    }

    /// Copies one node without its children.
    fn detached(&self, id: NodeId) -> Option<Element> {
        let data = self.node(id);
        match &data.kind {
            NodeKind::Element {
                name,
                text,
                attributes,
            } => Some(Element {
                name: name.clone(),
                text: text.clone(),
                attributes: attributes.clone(),
                children: Vec::new(),
                line_start: data.line_start,
                line_end: data.line_end,
            }),
            NodeKind::Document => None,
        }
    }

    /// Returns the total number of nodes in the arena (including the
    /// document node).
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len() - 1 // subtract placeholder at index 0
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

// --- Iterators ---

/// Iterator over the children of a node.
pub struct Children<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.doc.node(current).next_sibling;
        Some(current)
    }
}
