//! Iteration over the elements of an accessor.

use std::vec;

use crate::tree::ElementRef;

use super::Accessor;

/// Iterator yielding one `SingleElement` accessor per selected element.
///
/// Created by [`Accessor::iter`] or by iterating an `Accessor` directly.
/// A `Failure` yields nothing.
#[derive(Debug)]
pub struct IntoIter {
    inner: vec::IntoIter<ElementRef>,
}

impl IntoIter {
    pub(crate) fn new(elements: Vec<ElementRef>) -> Self {
        Self {
            inner: elements.into_iter(),
        }
    }
}

impl Iterator for IntoIter {
    type Item = Accessor;

    fn next(&mut self) -> Option<Accessor> {
        self.inner.next().map(Accessor::SingleElement)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for IntoIter {
    fn next_back(&mut self) -> Option<Accessor> {
        self.inner.next_back().map(Accessor::SingleElement)
    }
}

impl ExactSizeIterator for IntoIter {}

impl IntoIterator for Accessor {
    type Item = Accessor;
    type IntoIter = IntoIter;

    fn into_iter(self) -> IntoIter {
        match self {
            Accessor::SingleElement(element) => IntoIter::new(vec![element]),
            Accessor::Sequence(list) => IntoIter::new(list),
            Accessor::Failure(_) => IntoIter::new(Vec::new()),
        }
    }
}

impl IntoIterator for &Accessor {
    type Item = Accessor;
    type IntoIter = IntoIter;

    fn into_iter(self) -> IntoIter {
        self.iter()
    }
}

impl FromIterator<ElementRef> for Accessor {
    /// Collects handles with the usual cardinality rule: none is a
    /// `Failure`, one is a `SingleElement`, more is a `Sequence`.
    fn from_iter<I: IntoIterator<Item = ElementRef>>(iter: I) -> Self {
        Accessor::from_handles(iter.into_iter().collect(), || {
            "no elements collected".to_string()
        })
    }
}
