//! Path segments for mixed index/name navigation.

use std::fmt;

/// One step of a path: select by position or by child name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Select the element at this position of the current selection.
    Index(usize),
    /// Select the child elements with this name.
    Name(String),
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for PathSegment {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<&String> for PathSegment {
    fn from(name: &String) -> Self {
        Self::Name(name.clone())
    }
}

impl From<&PathSegment> for PathSegment {
    fn from(segment: &PathSegment) -> Self {
        segment.clone()
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "[{index}]"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// Builds a `Vec<PathSegment>` from a mix of indices and names.
///
/// ```
/// use xmlaccess::{path, Element, Accessor, PathSegment};
///
/// let segments = path![0, "ChildElement", 1];
/// assert_eq!(segments[1], PathSegment::Name("ChildElement".to_string()));
///
/// let xml = Accessor::from(Element::new("a").with_child(Element::new("b")));
/// assert_eq!(xml.path(path![0, "b"]).name().as_deref(), Some("b"));
/// ```
#[macro_export]
macro_rules! path {
    ($($segment:expr),* $(,)?) => {
        ::std::vec![$($crate::PathSegment::from($segment)),*]
    };
}
