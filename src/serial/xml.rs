//! XML serializer.
//!
//! Renders arena nodes as compact XML text: no indentation, no self-closing
//! tags, attributes in insertion order, and an element's text written
//! before its children.

use crate::accessor::Accessor;
use crate::error::{Error, Result};
use crate::tree::{Document, NodeId, NodeKind};

/// The only declaration ever written.
pub const DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Options controlling XML serialization output.
///
/// # Examples
///
/// ```
/// use xmlaccess::serial::{document_with_options, SerializeOptions};
///
/// let xml = xmlaccess::parse("<root><child>Hello</child></root>");
/// let out = document_with_options(&xml, &SerializeOptions::default().declaration(false)).unwrap();
/// assert_eq!(out, "<root><child>Hello</child></root>");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Whether to start the output with the XML declaration.
    /// Defaults to `true`.
    pub declaration: bool,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self { declaration: true }
    }
}

impl SerializeOptions {
    /// Enables or disables the leading `<?xml ...?>` declaration.
    #[must_use]
    pub fn declaration(mut self, declaration: bool) -> Self {
        self.declaration = declaration;
        self
    }
}

/// Serializes the elements selected by `accessor` into a document string.
///
/// A `SingleElement` renders one element (or, for the document node of a
/// parse, every top-level element); a `Sequence` renders each element in
/// order. A `Failure` cannot be serialized.
///
/// # Errors
///
/// Returns [`Error::Serialization`] wrapping the failure's own error when
/// `accessor` is a `Failure`.
///
/// # Examples
///
/// ```
/// use xmlaccess::{Accessor, Element};
///
/// let xml = Accessor::from(Element::new("a").with_text("1 < 2"));
/// assert_eq!(
///     xmlaccess::serial::document(&xml).unwrap(),
///     r#"<?xml version="1.0" encoding="UTF-8"?><a>1 &lt; 2</a>"#
/// );
/// ```
pub fn document(accessor: &Accessor) -> Result<String> {
    document_with_options(accessor, &SerializeOptions::default())
}

/// Serializes with the given options. See [`document`].
///
/// # Errors
///
/// Returns [`Error::Serialization`] when `accessor` is a `Failure`.
pub fn document_with_options(accessor: &Accessor, options: &SerializeOptions) -> Result<String> {
    let elements = match accessor {
        Accessor::Failure(err) => {
            return Err(Error::Serialization {
                source: Box::new(err.clone()),
            })
        }
        _ => accessor.all().unwrap_or_default(),
    };

    let mut output = String::new();
    if options.declaration {
        output.push_str(DECLARATION);
    }
    for element in &elements {
        write_node(&mut output, &element.document().borrow(), element.id());
    }
    log::trace!("serialized {} element(s) into {} bytes", elements.len(), output.len());
    Ok(output)
}

/// One pending step of the rendering walk.
enum Step {
    Open(NodeId),
    Close(NodeId),
}

/// Appends the XML text of `id` and its subtree to `out`.
///
/// The document node contributes only its children. The walk keeps its own
/// stack, so nesting depth is bounded by memory, not by the call stack.
pub(crate) fn write_node(out: &mut String, doc: &Document, id: NodeId) {
    let mut stack = vec![Step::Open(id)];
    while let Some(step) = stack.pop() {
        match step {
            Step::Open(id) => {
                if let NodeKind::Element {
                    name,
                    text,
                    attributes,
                } = &doc.node(id).kind
                {
                    out.push('<');
                    out.push_str(name);
                    for (key, value) in attributes {
                        out.push(' ');
                        out.push_str(key);
                        out.push_str("=\"");
                        write_escaped_attr(out, value);
                        out.push('"');
                    }
                    out.push('>');
                    if let Some(text) = text {
                        write_escaped_text(out, text);
                    }
                    stack.push(Step::Close(id));
                }
                let children: Vec<NodeId> = doc.children(id).collect();
                stack.extend(children.into_iter().rev().map(Step::Open));
            }
            Step::Close(id) => {
                if let Some(name) = doc.node_name(id) {
                    out.push_str("</");
                    out.push_str(name);
                    out.push('>');
                }
            }
        }
    }
}

/// Escapes character data: `&`, `<` and `>` become entity references.
pub fn write_escaped_text(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

/// Escapes an attribute value for a double-quoted attribute.
///
/// Besides the text escapes:
/// - `"` → `&quot;`
/// - `\t` → `&#9;`, `\n` → `&#10;`, `\r` → `&#13;`, so the value survives
///   attribute-value normalization when read back
pub fn write_escaped_attr(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\t' => out.push_str("&#9;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            _ => out.push(ch),
        }
    }
}
