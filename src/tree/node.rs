//! Node type definitions.
//!
//! The `NodeKind` enum carries the payload of a node in the document arena.
//! Only two kinds exist: the single document node at the arena root, and
//! elements. Text is a property of its element, not a separate node.

use super::Attributes;

/// The kind of a node and its associated data.
///
/// Navigation links (parent, children, siblings) and source line numbers
/// are stored in `NodeData`, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The document node. There is exactly one per `Document`; its children
    /// are the top-level elements.
    Document,

    /// An element node, e.g., `<item key="value">text</item>`.
    Element {
        /// The element name as stored (qualified, or local when the parse
        /// ignored namespaces).
        name: String,
        /// Character data of the element, `None` if none was ever set.
        text: Option<String>,
        /// Attributes in document (or insertion) order.
        attributes: Attributes,
    },
}

impl NodeKind {
    /// Creates an element payload with no text and no attributes.
    #[must_use]
    pub fn element(name: impl Into<String>) -> Self {
        Self::Element {
            name: name.into(),
            text: None,
            attributes: Attributes::new(),
        }
    }
}
