//! Owned element literals.

use super::Attributes;

/// A detached element subtree.
///
/// `Element` is how trees are written in code and how subtrees move in and
/// out of a document arena. It is a plain value: cloning copies the whole
/// subtree, and mutating it affects nothing else. Wrap it in an
/// [`Accessor`](crate::Accessor) to get shared, navigable nodes.
///
/// # Examples
///
/// ```
/// use xmlaccess::Element;
///
/// let root = Element::new("RootElement")
///     .with_text("text")
///     .with_attribute("key", "value")
///     .with_child(Element::new("ChildElement"))
///     .with_child(Element::new("ChildElement"));
/// assert_eq!(root.children.len(), 2);
/// ```
///
/// Clone, equality and drop walk the subtree with an explicit stack, so
/// arbitrarily deep trees are safe to copy, compare and free.
#[derive(Debug, Default)]
pub struct Element {
    /// Tag name.
    pub name: String,
    /// Character data, `None` when never set.
    pub text: Option<String>,
    /// Attributes in serialization order.
    pub attributes: Attributes,
    /// Child elements in document order.
    pub children: Vec<Element>,
    /// 1-based line of the start tag when the element came from a parse.
    pub line_start: Option<u32>,
    /// 1-based line of the end tag when the element came from a parse.
    pub line_end: Option<u32>,
}

impl Element {
    /// Creates an element with the given name and nothing else.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: None,
            attributes: Attributes::new(),
            children: Vec::new(),
            line_start: None,
            line_end: None,
        }
    }

    /// Copies this element without its children.
    fn shallow_clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            text: self.text.clone(),
            attributes: self.attributes.clone(),
            children: Vec::with_capacity(self.children.len()),
            line_start: self.line_start,
            line_end: self.line_end,
        }
    }

    fn same_node(&self, other: &Self) -> bool {
        self.name == other.name
            && self.text == other.text
            && self.attributes == other.attributes
            && self.line_start == other.line_start
            && self.line_end == other.line_end
            && self.children.len() == other.children.len()
    }

    /// Sets the text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Adds (or overwrites) one attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Adds attributes in iteration order.
    #[must_use]
    pub fn with_attributes<K, V>(mut self, attributes: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.attributes
            .extend(attributes.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Appends one child.
    #[must_use]
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Appends children in iteration order.
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }
}

impl Clone for Element {
    fn clone(&self) -> Self {
        // Each frame is a copy being filled and the source children left
        // to visit.
        let mut frames: Vec<(Element, std::slice::Iter<'_, Element>)> = Vec::new();
        let mut current = (self.shallow_clone(), self.children.iter());
        loop {
            if let Some(child) = current.1.next() {
                frames.push(current);
                current = (child.shallow_clone(), child.children.iter());
            } else {
                let Some(mut parent) = frames.pop() else {
                    return current.0;
                };
                parent.0.children.push(current.0);
                current = parent;
            }
        }
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((a, b)) = pending.pop() {
            if !a.same_node(b) {
                return false;
            }
            pending.extend(a.children.iter().zip(&b.children));
        }
        true
    }
}

impl Eq for Element {}

impl Drop for Element {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut element) = stack.pop() {
            stack.append(&mut element.children);
        }
    }
}
