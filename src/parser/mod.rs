//! XML parser front end.
//!
//! Bytes go through the tokenizer in [`crate::sax`]; the [`TreeBuilder`]
//! turns its events into a document arena. The result is always an
//! [`Accessor`]: on success a `SingleElement` over the document node, on
//! malformed input a `Failure` carrying [`Error::InterruptedParse`]. No
//! partially built tree is ever returned.
//!
//! ```
//! use xmlaccess::parser::{parse_with_options, ParseOptions, TextTrimming};
//!
//! let opts = ParseOptions::default()
//!     .trimming(TextTrimming::WhitespaceAndNewlines)
//!     .ignore_namespaces(true);
//! let xml = parse_with_options(b"<ns:a>\n  hi\n</ns:a>", &opts);
//! assert_eq!(xml.child("a").text().as_deref(), Some("hi"));
//! ```
//!
//! [`Error::InterruptedParse`]: crate::Error::InterruptedParse

mod builder;

pub use builder::TreeBuilder;

use crate::accessor::Accessor;
use crate::sax::parse_sax;

/// How element text is trimmed once it is complete.
///
/// Trimming is applied a single time, when the element closes, to the
/// concatenation of all of its character data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextTrimming {
    /// Keep text exactly as it appeared.
    #[default]
    None,
    /// Strip leading and trailing whitespace, keeping line breaks.
    Whitespace,
    /// Strip leading and trailing whitespace including line breaks.
    WhitespaceAndNewlines,
}

impl TextTrimming {
    /// Applies the policy to a finished text value.
    #[must_use]
    pub fn apply(self, text: &str) -> &str {
        match self {
            Self::None => text,
            Self::Whitespace => text.trim_matches(|c: char| c.is_whitespace() && !is_newline(c)),
            Self::WhitespaceAndNewlines => text.trim(),
        }
    }
}

fn is_newline(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Parse options.
///
/// Use the builder pattern to configure options:
///
/// ```
/// use xmlaccess::parser::{ParseOptions, TextTrimming};
///
/// let opts = ParseOptions::default()
///     .trimming(TextTrimming::Whitespace)
///     .ignore_namespaces(true);
/// assert!(opts.ignore_namespaces);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Text trimming policy (default: [`TextTrimming::None`]).
    pub trimming: TextTrimming,
    /// If true, drop `prefix:` from element and attribute names.
    pub ignore_namespaces: bool,
}

impl ParseOptions {
    /// Sets the text trimming policy.
    #[must_use]
    pub fn trimming(mut self, trimming: TextTrimming) -> Self {
        self.trimming = trimming;
        self
    }

    /// Enables or disables namespace prefix stripping.
    #[must_use]
    pub fn ignore_namespaces(mut self, yes: bool) -> Self {
        self.ignore_namespaces = yes;
        self
    }
}

/// Parses XML bytes with default options.
///
/// # Examples
///
/// ```
/// let xml = xmlaccess::parse("<root><child>Hello</child></root>");
/// assert_eq!(xml.path(["root", "child"]).text().as_deref(), Some("Hello"));
/// ```
pub fn parse(input: impl AsRef<[u8]>) -> Accessor {
    parse_with_options(input, &ParseOptions::default())
}

/// Parses an XML string with default options.
pub fn parse_str(input: &str) -> Accessor {
    parse(input)
}

/// Parses XML bytes with the given options.
pub fn parse_with_options(input: impl AsRef<[u8]>, options: &ParseOptions) -> Accessor {
    let input = input.as_ref();
    log::debug!(
        "parsing {} bytes (trimming: {:?}, ignore_namespaces: {})",
        input.len(),
        options.trimming,
        options.ignore_namespaces
    );
    let mut builder = TreeBuilder::new(options.clone());
    // The builder records the failure itself through `fatal_error`.
    let _ = parse_sax(input, &mut builder);
    builder.finish()
}
