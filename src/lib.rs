//! # xmlaccess
//!
//! Parse XML into a shared, mutable element tree, navigate it with a total
//! path algebra, and write it back out as canonical XML text.
//!
//! Navigation never panics and never returns `Option` chains: every step
//! yields an [`Accessor`], which is one element, several elements, or a
//! [`Failure`](Accessor::Failure) carrying the reason. Failures pass through
//! later steps untouched, so the first wrong step is the one reported.
//!
//! ## Quick Start
//!
//! ```
//! use xmlaccess::{path, Element};
//!
//! let xml = xmlaccess::parse(
//!     r#"<ResultSet><Result><Hit index="1"><Name>Item1</Name></Hit><Hit index="2"><Name>Item2</Name></Hit></Result></ResultSet>"#,
//! );
//!
//! // Names select children, indices select within a sequence.
//! let hits = xml.path(["ResultSet", "Result", "Hit"]);
//! assert_eq!(hits.names(), Some(vec!["Hit".to_string(), "Hit".to_string()]));
//! assert_eq!(xml.path(path!["ResultSet", "Result", "Hit", 1, "Name"]).text().as_deref(), Some("Item2"));
//! assert_eq!(hits.first().attribute("index").as_deref(), Some("1"));
//!
//! // Wrong paths are values, not panics.
//! assert!(xml.path(path!["ResultSet", "Nope", 4]).is_failure());
//!
//! // Edits write through to the shared tree.
//! hits.last().child("Name").set_text("Renamed");
//! xml.path(["ResultSet", "Result"]).append(&Element::new("Hit").with_attribute("index", "3"));
//! let out = xmlaccess::serial::document(&xml).unwrap();
//! assert!(out.contains("<Name>Renamed</Name>"));
//! assert!(out.ends_with(r#"<Hit index="3"></Hit></Result></ResultSet>"#));
//! ```
//!
//! ## Modules
//!
//! - [`accessor`]: the `Accessor` algebra and path segments
//! - [`parser`]: parse options and the event-driven tree builder
//! - [`sax`]: the tokenizer event contract
//! - [`serial`]: XML output
//! - [`tree`]: the document arena, shared handles and owned literals

pub mod accessor;
pub mod error;
pub mod parser;
pub mod sax;
pub mod serial;
pub mod tree;
pub mod util;

// Re-export primary types at the crate root for convenience.
pub use accessor::{Accessor, PathSegment};
pub use error::{Error, Result, SourceLocation};
pub use parser::{parse, parse_str, parse_with_options, ParseOptions, TextTrimming};
pub use serial::{document, document_with_options, SerializeOptions};
pub use tree::{Attributes, Element, ElementRef};
