//! Error types shared by the parser, the accessor algebra and the serializer.
//!
//! Navigation never panics: a wrong index or a missing name is captured as
//! [`Error::Access`] inside an [`Accessor::Failure`](crate::Accessor::Failure)
//! and carried along until the caller inspects it. Parse and serialization
//! failures use the same enum so a single `error()` check covers every
//! stage of a pipeline.

use std::fmt;

use thiserror::Error;

/// Source location within an XML document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number (in characters, not bytes).
    pub column: u32,
    /// 0-based byte offset from the start of the input.
    pub byte_offset: usize,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The closed set of failures this crate reports.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A path step did not resolve: index out of range, no child with the
    /// requested name, or a name lookup on a multi-element selection.
    #[error("access error: {description}")]
    Access { description: String },

    /// The tokenizer reported malformed input. The whole parse is discarded.
    #[error("parse interrupted at {location}: {message}")]
    InterruptedParse {
        message: String,
        location: SourceLocation,
    },

    /// A failed accessor was handed to the serializer.
    #[error("cannot serialize a failed accessor: {source}")]
    Serialization { source: Box<Error> },
}

impl Error {
    pub(crate) fn access(description: impl Into<String>) -> Self {
        Self::Access {
            description: description.into(),
        }
    }

    pub(crate) fn interrupted(message: impl Into<String>, location: SourceLocation) -> Self {
        Self::InterruptedParse {
            message: message.into(),
            location,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
