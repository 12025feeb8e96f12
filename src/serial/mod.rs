//! XML serialization.
//!
//! This module turns the elements selected by an [`Accessor`] back into XML
//! text. Output is canonical for this crate: a fixed declaration, no
//! whitespace between tags, and explicit end tags for empty elements.
//!
//! [`Accessor`]: crate::Accessor

pub mod xml;

pub(crate) use xml::write_node;
pub use xml::{document, document_with_options, SerializeOptions, DECLARATION};
