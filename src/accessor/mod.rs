//! The accessor algebra.
//!
//! An [`Accessor`] is the result of every navigation step: exactly one
//! element, several elements, or the reason nothing was found. Every
//! operation is total. Steps that cannot be taken produce a `Failure`, and a
//! `Failure` passes through every later step unchanged, so long chains can
//! be written without checking intermediate results.
//!
//! ```
//! use xmlaccess::{Accessor, Element};
//!
//! let xml = Accessor::from(
//!     Element::new("Root")
//!         .with_child(Element::new("Item").with_text("1"))
//!         .with_child(Element::new("Item").with_text("2")),
//! );
//! assert_eq!(xml.child("Item").at(1).int(), Some(2));
//! assert!(xml.child("Missing").child("Deeper").at(3).is_failure());
//! ```
//!
//! Handles inside an accessor alias the nodes of a shared arena. Setters
//! write through to that arena and are visible from every accessor that
//! selects the same node.

mod iter;
mod path;

pub use iter::IntoIter;
pub use path::PathSegment;

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::tree::{Attributes, Document, Element, ElementRef};

/// Result of a navigation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Accessor {
    /// Exactly one element.
    SingleElement(ElementRef),
    /// Two or more elements, in document order. Never empty.
    Sequence(Vec<ElementRef>),
    /// Nothing was selected.
    Failure(Error),
}

impl Accessor {
    /// Applies the cardinality rule to a list of handles: none becomes an
    /// access failure described by `describe`, one a `SingleElement`, more a
    /// `Sequence`.
    pub(crate) fn from_handles(
        mut list: Vec<ElementRef>,
        describe: impl FnOnce() -> String,
    ) -> Self {
        match list.len() {
            0 => Self::Failure(Error::access(describe())),
            1 => match list.pop() {
                Some(element) => Self::SingleElement(element),
                None => Self::Failure(Error::access(describe())),
            },
            _ => Self::Sequence(list),
        }
    }

    /// Selects by position.
    ///
    /// A `SingleElement` only has position 0. A `Sequence` selects its
    /// `index`-th element.
    #[must_use]
    pub fn at(&self, index: usize) -> Accessor {
        match self {
            Self::SingleElement(_) if index == 0 => self.clone(),
            Self::SingleElement(element) => Self::Failure(Error::access(format!(
                "index {index} out of range: `{}` is a single element",
                display_name(element)
            ))),
            Self::Sequence(list) => match list.get(index) {
                Some(element) => Self::SingleElement(element.clone()),
                None => Self::Failure(Error::access(format!(
                    "index {index} out of range for {} elements",
                    list.len()
                ))),
            },
            Self::Failure(_) => self.clone(),
        }
    }

    /// Selects the child elements named `name`.
    ///
    /// Only defined on a `SingleElement`; on a `Sequence` the parent is
    /// ambiguous and the result is a `Failure`.
    #[must_use]
    pub fn child(&self, name: &str) -> Accessor {
        match self {
            Self::SingleElement(element) => {
                Self::from_handles(element.children_named(name), || {
                    format!(
                        "`{}` has no child element named `{name}`",
                        display_name(element)
                    )
                })
            }
            Self::Sequence(list) => Self::Failure(Error::access(format!(
                "cannot select `{name}` from {} elements; pick one by index first",
                list.len()
            ))),
            Self::Failure(_) => self.clone(),
        }
    }

    /// All child elements of a `SingleElement`, with the same cardinality
    /// rule as [`child`](Self::child).
    #[must_use]
    pub fn children(&self) -> Accessor {
        match self {
            Self::SingleElement(element) => Self::from_handles(element.children(), || {
                format!("`{}` has no child elements", display_name(element))
            }),
            Self::Sequence(list) => Self::Failure(Error::access(format!(
                "cannot list children of {} elements; pick one by index first",
                list.len()
            ))),
            Self::Failure(_) => self.clone(),
        }
    }

    /// Takes one step of a path.
    #[must_use]
    pub fn get(&self, segment: impl Into<PathSegment>) -> Accessor {
        match segment.into() {
            PathSegment::Index(index) => self.at(index),
            PathSegment::Name(name) => self.child(&name),
        }
    }

    /// Follows a path of mixed indices and names, stopping at the first
    /// failure.
    ///
    /// ```
    /// use xmlaccess::{path, Accessor, Element};
    ///
    /// let xml = Accessor::from(vec![
    ///     Element::new("Element").with_child(Element::new("Child")).with_child(Element::new("Child")),
    ///     Element::new("Element"),
    /// ]);
    /// assert!(matches!(xml.path(path![0, "Child", 1]), Accessor::SingleElement(_)));
    /// assert!(xml.path(path![1, "Nope", "Deeper"]).is_failure());
    /// ```
    #[must_use]
    pub fn path<I>(&self, segments: I) -> Accessor
    where
        I: IntoIterator,
        I::Item: Into<PathSegment>,
    {
        let mut current = self.clone();
        for segment in segments {
            if current.is_failure() {
                break;
            }
            current = current.get(segment);
        }
        current
    }

    /// The element name of a `SingleElement`.
    ///
    /// `None` for sequences, failures and the document node of a parse.
    #[must_use]
    pub fn name(&self) -> Option<String> {
        self.element().and_then(|element| element.name())
    }

    /// The element text of a `SingleElement`.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        self.element().and_then(|element| element.text())
    }

    /// Replaces the text of a `SingleElement`. No-op otherwise.
    pub fn set_text(&self, text: impl Into<String>) {
        if let Self::SingleElement(element) = self {
            element.set_text(Some(text.into()));
        }
    }

    /// Removes the text of a `SingleElement`. No-op otherwise.
    pub fn clear_text(&self) {
        if let Self::SingleElement(element) = self {
            element.set_text(None);
        }
    }

    /// The attributes of a `SingleElement`, empty otherwise.
    #[must_use]
    pub fn attributes(&self) -> Attributes {
        self.element()
            .map(|element| element.attributes())
            .unwrap_or_default()
    }

    /// One attribute of a `SingleElement`.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.element().and_then(|element| element.attribute(name))
    }

    /// Replaces all attributes of a `SingleElement`. No-op otherwise.
    pub fn set_attributes(&self, attributes: Attributes) {
        if let Self::SingleElement(element) = self {
            element.set_attributes(attributes);
        }
    }

    /// Sets one attribute of a `SingleElement`. No-op otherwise.
    pub fn set_attribute(&self, name: impl Into<String>, value: impl Into<String>) {
        if let Self::SingleElement(element) = self {
            element.set_attribute(name, value);
        }
    }

    /// Appends a copy of `element` as the last child of a `SingleElement`.
    ///
    /// Appending to the document node of a parse adds a top-level element.
    /// No-op on sequences and failures.
    pub fn append(&self, element: &Element) {
        if let Self::SingleElement(parent) = self {
            parent.append(element);
        }
    }

    /// Every selected element. `None` for a `Failure`.
    #[must_use]
    pub fn all(&self) -> Option<Vec<ElementRef>> {
        match self {
            Self::SingleElement(element) => Some(vec![element.clone()]),
            Self::Sequence(list) => Some(list.clone()),
            Self::Failure(_) => None,
        }
    }

    /// The name of every selected element. `None` for a `Failure`.
    ///
    /// The document node has no name and contributes nothing, so a parsed
    /// document on its own yields an empty list.
    #[must_use]
    pub fn names(&self) -> Option<Vec<String>> {
        self.all()
            .map(|list| list.iter().filter_map(ElementRef::name).collect())
    }

    /// The error of a `Failure`.
    #[must_use]
    pub fn error(&self) -> Option<&Error> {
        match self {
            Self::Failure(err) => Some(err),
            _ => None,
        }
    }

    /// Returns `true` for a `Failure`.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// The handle of a `SingleElement`.
    #[must_use]
    pub fn element(&self) -> Option<ElementRef> {
        match self {
            Self::SingleElement(element) => Some(element.clone()),
            _ => None,
        }
    }

    /// The first selected element as a `SingleElement`.
    #[must_use]
    pub fn first(&self) -> Accessor {
        match self {
            Self::Sequence(list) => list
                .first()
                .cloned()
                .map_or_else(|| self.clone(), Self::SingleElement),
            _ => self.clone(),
        }
    }

    /// The last selected element as a `SingleElement`.
    #[must_use]
    pub fn last(&self) -> Accessor {
        match self {
            Self::Sequence(list) => list
                .last()
                .cloned()
                .map_or_else(|| self.clone(), Self::SingleElement),
            _ => self.clone(),
        }
    }

    /// Iterates the selected elements, one `SingleElement` each.
    #[must_use]
    pub fn iter(&self) -> IntoIter {
        IntoIter::new(self.all().unwrap_or_default())
    }

    /// Calls `f` once per selected element.
    pub fn map<T>(&self, f: impl FnMut(Accessor) -> T) -> Vec<T> {
        self.iter().map(f).collect()
    }

    /// Like [`map`](Self::map), dropping `None` results.
    pub fn compact_map<T>(&self, f: impl FnMut(Accessor) -> Option<T>) -> Vec<T> {
        self.iter().filter_map(f).collect()
    }

    /// Parses the text of a `SingleElement`.
    ///
    /// ```
    /// let xml = xmlaccess::parse("<n>42</n>");
    /// assert_eq!(xml.child("n").value::<u8>(), Some(42));
    /// assert_eq!(xml.child("n").value::<bool>(), None);
    /// ```
    #[must_use]
    pub fn value<T: FromStr>(&self) -> Option<T> {
        self.text().and_then(|text| text.parse().ok())
    }

    /// The text as a signed integer.
    #[must_use]
    pub fn int(&self) -> Option<i64> {
        self.value()
    }

    /// The text as a floating point number.
    #[must_use]
    pub fn double(&self) -> Option<f64> {
        self.value()
    }

    /// The text as a boolean (`true` or `false`).
    #[must_use]
    pub fn bool(&self) -> Option<bool> {
        self.value()
    }
}

fn display_name(element: &ElementRef) -> String {
    element.name().unwrap_or_else(|| "#document".to_string())
}

impl From<Element> for Accessor {
    fn from(element: Element) -> Self {
        Self::SingleElement(ElementRef::from_element(&element))
    }
}

impl From<Vec<Element>> for Accessor {
    /// Places all elements side by side in one new arena.
    fn from(elements: Vec<Element>) -> Self {
        let mut doc = Document::new();
        let root = doc.root();
        let ids: Vec<_> = elements
            .iter()
            .map(|element| {
                let id = doc.import(element);
                doc.append_child(root, id);
                id
            })
            .collect();
        let doc = doc.into_shared();
        let handles = ids
            .into_iter()
            .map(|id| ElementRef::new(doc.clone(), id))
            .collect();
        Self::from_handles(handles, || "no elements given".to_string())
    }
}

impl From<ElementRef> for Accessor {
    fn from(element: ElementRef) -> Self {
        Self::SingleElement(element)
    }
}

impl From<Error> for Accessor {
    fn from(err: Error) -> Self {
        Self::Failure(err)
    }
}

impl fmt::Display for Accessor {
    /// Writes the selected elements as XML without a declaration, or the
    /// error of a `Failure`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failure(err) => write!(f, "{err}"),
            _ => {
                let mut out = String::new();
                for element in self.all().unwrap_or_default() {
                    crate::serial::write_node(&mut out, &element.document().borrow(), element.id());
                }
                f.write_str(&out)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::path;
    use pretty_assertions::assert_eq;

    fn single_element() -> Element {
        Element::new("RootElement")
            .with_text("text")
            .with_attribute("key", "value")
            .with_child(Element::new("ChildElement"))
            .with_child(Element::new("ChildElement"))
    }

    fn single_element_with_children_attributes() -> Element {
        Element::new("RootElement")
            .with_child(Element::new("ChildElement1").with_attribute("key1", "value1"))
            .with_child(Element::new("ChildElement2").with_attribute("key2", "value2"))
    }

    fn sequence() -> Vec<Element> {
        vec![
            Element::new("Element")
                .with_text("text")
                .with_attribute("key", "value")
                .with_child(Element::new("ChildElement1"))
                .with_child(Element::new("ChildElement1")),
            Element::new("Element")
                .with_text("text2")
                .with_child(Element::new("ChildElement2"))
                .with_child(Element::new("ChildElement2")),
        ]
    }

    fn failure() -> Accessor {
        Accessor::from(Error::access("error"))
    }

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_at_on_single_element() {
        let xml = Accessor::from(single_element());
        assert_eq!(xml.at(0).name().as_deref(), Some("RootElement"));
        assert!(xml.at(1).is_failure());
    }

    #[test]
    fn test_at_on_sequence() {
        let xml = Accessor::from(sequence());
        assert_eq!(xml.at(0).name().as_deref(), Some("Element"));
        assert_eq!(xml.at(1).text().as_deref(), Some("text2"));
        assert!(xml.at(2).is_failure());
    }

    #[test]
    fn test_child_does_not_match_self() {
        let xml = Accessor::from(single_element());
        assert!(xml.child("RootElement").is_failure());
    }

    #[test]
    fn test_child_with_two_matches_is_sequence() {
        let xml = Accessor::from(single_element());
        assert!(matches!(xml.child("ChildElement"), Accessor::Sequence(ref l) if l.len() == 2));
    }

    #[test]
    fn test_child_on_sequence_fails() {
        let xml = Accessor::from(sequence());
        assert!(xml.child("ChildElement1").is_failure());
        assert!(matches!(xml.at(0).child("ChildElement1"), Accessor::Sequence(_)));
    }

    #[test]
    fn test_failure_is_absorbing() {
        let xml = failure();
        assert_eq!(xml.at(0), xml);
        assert_eq!(xml.child("ChildElement"), xml);
        assert_eq!(xml.path(path![0, "a", 2]), xml);
        assert_eq!(xml.first(), xml);
        assert_eq!(xml.children(), xml);
    }

    #[test]
    fn test_path_short_circuits_on_first_failure() {
        let xml = Accessor::from(sequence());
        assert!(matches!(xml.path(path![0, "ChildElement1", 1]), Accessor::SingleElement(_)));

        let failed = xml.path(path![1, "Hoget", "Foge"]);
        let Some(Error::Access { description }) = failed.error() else {
            panic!("expected an access error, got {failed:?}");
        };
        assert!(description.contains("Hoget"), "{description}");
    }

    #[test]
    fn test_reads_by_variant() {
        let single = Accessor::from(single_element());
        let seq = Accessor::from(sequence());
        let fail = failure();

        assert_eq!(single.name().as_deref(), Some("RootElement"));
        assert_eq!(seq.name(), None);
        assert_eq!(fail.name(), None);

        assert_eq!(single.text().as_deref(), Some("text"));
        assert_eq!(seq.text(), None);
        assert_eq!(fail.text(), None);

        assert_eq!(single.attributes(), attrs(&[("key", "value")]));
        assert!(seq.attributes().is_empty());
        assert!(fail.attributes().is_empty());

        assert_eq!(single.all().map(|l| l.len()), Some(1));
        assert_eq!(seq.all().map(|l| l.len()), Some(2));
        assert_eq!(fail.all(), None);

        assert_eq!(single.names(), Some(vec!["RootElement".to_string()]));
        assert_eq!(
            seq.names(),
            Some(vec!["Element".to_string(), "Element".to_string()])
        );
        assert_eq!(fail.names(), None);
        assert_eq!(crate::parse("<a/>").names(), Some(Vec::new()));

        assert!(single.error().is_none());
        assert!(seq.error().is_none());
        assert!(fail.error().is_some());
    }

    #[test]
    fn test_set_text_writes_through() {
        let xml = Accessor::from(single_element());
        xml.set_text("text2");
        assert_eq!(xml.text().as_deref(), Some("text2"));

        let first = xml.child("ChildElement").first();
        first.set_text("childText1");
        xml.child("ChildElement").last().set_text("childText2");
        assert_eq!(first.text().as_deref(), Some("childText1"));

        assert_eq!(
            xml.to_string(),
            "<RootElement key=\"value\">text2<ChildElement>childText1</ChildElement>\
             <ChildElement>childText2</ChildElement></RootElement>"
        );

        xml.clear_text();
        assert_eq!(xml.text(), None);
    }

    #[test]
    fn test_set_text_on_sequence_is_a_no_op() {
        let xml = Accessor::from(sequence());
        xml.set_text("text");
        assert_eq!(xml.text(), None);
        assert_eq!(xml.first().text().as_deref(), Some("text"));

        xml.first().child("ChildElement1").set_text("childText");
        assert_eq!(xml.first().child("ChildElement1").first().text(), None);
    }

    #[test]
    fn test_set_attributes() {
        let xml = Accessor::from(single_element());
        xml.set_attributes(attrs(&[("key", "newValue")]));
        assert_eq!(xml.attributes(), attrs(&[("key", "newValue")]));

        let other = Accessor::from(single_element_with_children_attributes());
        let child = other.child("ChildElement1");
        child.set_attribute("key1", "newValue1");
        assert_eq!(child.attributes(), attrs(&[("key1", "newValue1")]));
        assert_eq!(
            other.to_string(),
            "<RootElement><ChildElement1 key1=\"newValue1\"></ChildElement1>\
             <ChildElement2 key2=\"value2\"></ChildElement2></RootElement>"
        );
    }

    #[test]
    fn test_first_and_last() {
        let xml = Accessor::from(sequence());
        assert_eq!(xml.first().text().as_deref(), Some("text"));
        assert_eq!(xml.last().text().as_deref(), Some("text2"));

        let single = Accessor::from(single_element());
        assert_eq!(single.first(), single);
        assert_eq!(single.last(), single);
    }

    #[test]
    fn test_map_and_compact_map() {
        assert_eq!(Accessor::from(single_element()).map(|a| a).len(), 1);
        assert_eq!(Accessor::from(sequence()).map(|a| a).len(), 2);
        assert_eq!(failure().map(|a| a).len(), 0);

        assert_eq!(
            Accessor::from(sequence()).compact_map(|a| a.text()),
            vec!["text".to_string(), "text2".to_string()]
        );
        assert_eq!(
            Accessor::from(single_element())
                .child("ChildElement")
                .compact_map(|a| a.text()),
            Vec::<String>::new()
        );
    }

    #[test]
    fn test_iteration_counts() {
        assert_eq!(Accessor::from(single_element()).iter().count(), 1);
        assert_eq!((&Accessor::from(sequence())).into_iter().count(), 2);
        assert_eq!(failure().into_iter().count(), 0);
    }

    #[test]
    fn test_append_nests_copy() {
        let xml = Accessor::from(single_element());
        assert_eq!(xml.child("RootElement").text(), None);

        xml.append(&single_element());
        assert_eq!(xml.child("RootElement").text().as_deref(), Some("text"));
        assert_eq!(
            xml.to_string(),
            "<RootElement key=\"value\">text<ChildElement></ChildElement><ChildElement></ChildElement>\
             <RootElement key=\"value\">text<ChildElement></ChildElement><ChildElement></ChildElement>\
             </RootElement></RootElement>"
        );
    }

    #[test]
    fn test_append_to_first_child() {
        let xml = Accessor::from(single_element());
        xml.child("ChildElement")
            .first()
            .append(&single_element_with_children_attributes());

        let added = xml.child("ChildElement").first();
        assert_eq!(
            added.path(["RootElement", "ChildElement1"]).attributes(),
            attrs(&[("key1", "value1")])
        );
        assert_eq!(
            added.path(["RootElement", "ChildElement2"]).attributes(),
            attrs(&[("key2", "value2")])
        );
    }

    #[test]
    fn test_append_on_sequence_and_failure_is_a_no_op() {
        let seq = Accessor::from(sequence());
        let before = seq.to_string();
        seq.append(&Element::new("x"));
        assert_eq!(seq.to_string(), before);

        let fail = failure();
        fail.append(&Element::new("x"));
        assert!(fail.is_failure());
    }

    #[test]
    fn test_values() {
        let xml = Accessor::from(
            Element::new("v")
                .with_child(Element::new("i").with_text("-12"))
                .with_child(Element::new("d").with_text("2.5"))
                .with_child(Element::new("b").with_text("true"))
                .with_child(Element::new("s").with_text("abc")),
        );
        assert_eq!(xml.child("i").int(), Some(-12));
        assert_eq!(xml.child("d").double(), Some(2.5));
        assert_eq!(xml.child("b").bool(), Some(true));
        assert_eq!(xml.child("s").int(), None);
        assert_eq!(xml.child("missing").int(), None);
    }

    #[test]
    fn test_empty_vec_is_failure() {
        assert!(Accessor::from(Vec::<Element>::new()).is_failure());
        assert!(matches!(
            Accessor::from(vec![Element::new("one")]),
            Accessor::SingleElement(_)
        ));
    }

    #[test]
    fn test_children_cardinality() {
        let xml = Accessor::from(single_element());
        assert!(matches!(xml.children(), Accessor::Sequence(ref l) if l.len() == 2));
        assert!(xml.child("ChildElement").first().children().is_failure());
        assert!(Accessor::from(sequence()).children().is_failure());
    }

    #[test]
    fn test_collect_handles() {
        let xml = Accessor::from(single_element());
        let collected: Accessor = xml.child("ChildElement").all().unwrap().into_iter().collect();
        assert_eq!(collected, xml.child("ChildElement"));
        let none: Accessor = Vec::<ElementRef>::new().into_iter().collect();
        assert!(none.is_failure());
    }

    #[test]
    fn test_display_failure() {
        assert_eq!(failure().to_string(), "access error: error");
    }
}
