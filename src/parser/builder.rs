//! Event-driven tree construction.
//!
//! The builder is an explicit state machine: a stack of open elements, each
//! with its own pending text buffer, plus the list of finished top-level
//! elements. Nesting depth lives in heap-allocated vectors, never on the
//! call stack.

use crate::accessor::Accessor;
use crate::error::{Error, SourceLocation};
use crate::sax::SaxHandler;
use crate::tree::{Attributes, Document, ElementRef, NodeId, NodeKind};
use crate::util::qname::local_name;

use super::ParseOptions;

/// An element that has started but not ended yet.
#[derive(Debug)]
struct OpenElement {
    id: NodeId,
    /// Character data seen so far, `None` until the first chunk arrives.
    text: Option<String>,
}

/// Builds a document from tokenizer events.
///
/// Feed it to [`parse_sax`](crate::sax::parse_sax), then call
/// [`finish`](Self::finish) to get the result.
#[derive(Debug)]
pub struct TreeBuilder {
    options: ParseOptions,
    doc: Document,
    stack: Vec<OpenElement>,
    roots: Vec<NodeId>,
    error: Option<Error>,
    finished: bool,
}

impl TreeBuilder {
    /// Creates a builder for one parse.
    #[must_use]
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            doc: Document::new(),
            stack: Vec::new(),
            roots: Vec::new(),
            error: None,
            finished: false,
        }
    }

    /// Consumes the builder and returns the parse result.
    ///
    /// - a fatal error was reported: `Failure` with that error;
    /// - the event stream did not end cleanly, or no element was seen:
    ///   `Failure(InterruptedParse)`;
    /// - otherwise `SingleElement` over the document node, whose children
    ///   are the top-level elements.
    #[must_use]
    pub fn finish(self) -> Accessor {
        if let Some(err) = self.error {
            return Accessor::Failure(err);
        }
        if !self.finished || !self.stack.is_empty() {
            return Accessor::Failure(Error::interrupted(
                "event stream ended before the document was complete",
                SourceLocation::default(),
            ));
        }
        if self.roots.is_empty() {
            return Accessor::Failure(Error::interrupted(
                "document has no root element",
                SourceLocation::default(),
            ));
        }

        let mut doc = self.doc;
        let root = doc.root();
        for id in self.roots {
            doc.append_child(root, id);
        }
        log::debug!("parsed {} node(s)", doc.node_count());
        Accessor::SingleElement(ElementRef::new(doc.into_shared(), root))
    }

    fn name<'a>(&self, qualified_name: &'a str) -> &'a str {
        if self.options.ignore_namespaces {
            local_name(qualified_name)
        } else {
            qualified_name
        }
    }
}

impl SaxHandler for TreeBuilder {
    fn start_element(&mut self, qualified_name: &str, attributes: &[(String, String)], line: u32) {
        if self.error.is_some() {
            return;
        }
        log::trace!("start_element {qualified_name} at line {line}");

        let mut attrs = Attributes::with_capacity(attributes.len());
        for (key, value) in attributes {
            attrs.insert(self.name(key).to_string(), value.clone());
        }
        let name = self.name(qualified_name).to_string();
        let id = self.doc.create_node(NodeKind::Element {
            name,
            text: None,
            attributes: attrs,
        });
        self.doc.node_mut(id).line_start = Some(line);
        self.stack.push(OpenElement { id, text: None });
    }

    fn characters(&mut self, content: &str) {
        if self.error.is_some() {
            return;
        }
        if let Some(open) = self.stack.last_mut() {
            open.text.get_or_insert_with(String::new).push_str(content);
        }
    }

    fn end_element(&mut self, line: u32) {
        if self.error.is_some() {
            return;
        }
        let Some(open) = self.stack.pop() else {
            self.error = Some(Error::interrupted(
                "end of element without a matching start",
                SourceLocation {
                    line,
                    ..SourceLocation::default()
                },
            ));
            return;
        };
        log::trace!("end_element at line {line}");

        let text = open
            .text
            .map(|text| self.options.trimming.apply(&text).to_string());
        self.doc.set_text(open.id, text);
        self.doc.node_mut(open.id).line_end = Some(line);

        match self.stack.last() {
            Some(parent) => self.doc.append_child(parent.id, open.id),
            None => self.roots.push(open.id),
        }
    }

    fn end_document(&mut self) {
        self.finished = true;
    }

    fn fatal_error(&mut self, message: &str, location: SourceLocation) {
        log::debug!("discarding partial tree: {message}");
        // Drop everything built so far; only the error survives.
        self.doc = Document::new();
        self.stack.clear();
        self.roots.clear();
        if self.error.is_none() {
            self.error = Some(Error::interrupted(message, location));
        }
    }
}
