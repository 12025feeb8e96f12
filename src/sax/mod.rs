//! Streaming event handler API.
//!
//! The tree builder does not read bytes itself. It consumes the event
//! stream produced here: element starts (with their qualified name,
//! attributes and line), character data, element ends, and finally either
//! `end_document` or a single `fatal_error`.
//!
//! Tokenizing is delegated to `quick-xml`. This module adapts its pull
//! events to callbacks and adds the well-formedness checks the event
//! contract promises: only XML `Char`s in text and attribute values, no
//! character data outside the root element, only known entity references,
//! and no unclosed elements at end of input.
//!
//! # Examples
//!
//! ```
//! use xmlaccess::sax::{parse_sax, SaxHandler};
//!
//! struct Counter {
//!     elements: usize,
//! }
//!
//! impl SaxHandler for Counter {
//!     fn start_element(&mut self, _name: &str, _attributes: &[(String, String)], _line: u32) {
//!         self.elements += 1;
//!     }
//! }
//!
//! let mut counter = Counter { elements: 0 };
//! parse_sax(b"<root><a/><b/><c/></root>", &mut counter).unwrap();
//! assert_eq!(counter.elements, 4);
//! ```

use std::borrow::Cow;

use quick_xml::escape::resolve_xml_entity;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Error, Result, SourceLocation};

/// An event handler for the tokenizer's output.
///
/// All methods have default no-op implementations so you only need to
/// override what you need.
///
/// For well-formed input the order is `start_document`, a properly nested
/// sequence of `start_element` / `characters` / `end_element`, then
/// `end_document`. Malformed input replaces `end_document` with exactly one
/// `fatal_error`, after which no further events arrive.
#[allow(unused_variables)]
pub trait SaxHandler {
    /// Called before any other event.
    fn start_document(&mut self) {}

    /// Called after the last element closed and the input was consumed.
    fn end_document(&mut self) {}

    /// Called for a start tag (or the start of a self-closing tag).
    ///
    /// `qualified_name` keeps any `prefix:` verbatim. `attributes` are
    /// `(qualified_name, value)` pairs in document order with entity
    /// references already resolved. `line` is the 1-based line on which the
    /// tag ends.
    fn start_element(&mut self, qualified_name: &str, attributes: &[(String, String)], line: u32) {
    }

    /// Called for a run of character data inside the current element.
    ///
    /// A single text node may arrive as several calls: the tokenizer splits
    /// at entity references, CDATA sections and comments.
    fn characters(&mut self, content: &str) {}

    /// Called when the most recently opened element closes.
    fn end_element(&mut self, line: u32) {}

    /// Called once when the input turns out to be malformed.
    fn fatal_error(&mut self, message: &str, location: SourceLocation) {}
}

/// A default no-op handler. Useful as a base or for well-formedness checks.
pub struct DefaultHandler;

impl SaxHandler for DefaultHandler {}

/// Tokenizes `input`, firing events on `handler`.
///
/// A leading UTF-8 byte order mark is skipped. Input must be UTF-8.
///
/// # Errors
///
/// Returns [`Error::InterruptedParse`] for malformed input, after the same
/// error has been reported to `handler.fatal_error`.
pub fn parse_sax(input: &[u8], handler: &mut dyn SaxHandler) -> Result<()> {
    let input = input.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(input);
    SaxParser::new(input, handler).parse()
}

/// Drives a `quick-xml` reader and translates its events.
struct SaxParser<'a, 'h> {
    input: &'a [u8],
    reader: Reader<&'a [u8]>,
    handler: &'h mut dyn SaxHandler,
    lines: LineTracker<'a>,
    /// Number of currently open elements.
    depth: usize,
}

impl<'a, 'h> SaxParser<'a, 'h> {
    fn new(input: &'a [u8], handler: &'h mut dyn SaxHandler) -> Self {
        let mut reader = Reader::from_reader(input);
        let config = reader.config_mut();
        config.trim_text(false);
        config.check_end_names = true;
        config.expand_empty_elements = false;

        Self {
            input,
            reader,
            handler,
            lines: LineTracker::new(input),
            depth: 0,
        }
    }

    fn parse(mut self) -> Result<()> {
        self.handler.start_document();
        match self.run() {
            Ok(()) => {
                self.handler.end_document();
                Ok(())
            }
            Err(err) => {
                if let Error::InterruptedParse { message, location } = &err {
                    log::debug!("tokenizer stopped at {location}: {message}");
                    self.handler.fatal_error(message, *location);
                }
                Err(err)
            }
        }
    }

    fn run(&mut self) -> Result<()> {
        loop {
            let start = self.position();
            let event = match self.reader.read_event() {
                Ok(event) => event,
                Err(err) => {
                    let at = self.clamp(self.reader.error_position());
                    return Err(self.fatal(at, err.to_string()));
                }
            };
            let end = self.position();
            let line = self.lines.advance_to(end);

            match event {
                Event::Start(ref e) => self.start_element(e, start, line)?,
                Event::Empty(ref e) => {
                    self.start_element(e, start, line)?;
                    self.end_element(start, line)?;
                }
                Event::End(_) => self.end_element(start, line)?,
                Event::Text(e) => {
                    let text = e
                        .decode()
                        .map_err(|err| self.fatal(start, err.to_string()))?;
                    self.characters(&text, start)?;
                }
                Event::CData(e) => {
                    let text = std::str::from_utf8(&e)
                        .map_err(|err| self.fatal(start, err.to_string()))?;
                    // Content begins after `<![CDATA[`.
                    self.characters(text, start + 9)?;
                }
                Event::GeneralRef(e) => {
                    let name = e
                        .decode()
                        .map_err(|err| self.fatal(start, err.to_string()))?;
                    let resolved = self.resolve_reference(&name, start)?;
                    self.characters(&resolved, start)?;
                }
                Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_) => {}
                Event::Eof => {
                    if self.depth > 0 {
                        return Err(self.fatal(
                            self.input.len(),
                            format!("unexpected end of input: {} unclosed element(s)", self.depth),
                        ));
                    }
                    return Ok(());
                }
            }
        }
    }

    fn start_element(&mut self, e: &BytesStart<'_>, start: usize, line: u32) -> Result<()> {
        let name = std::str::from_utf8(e.name().as_ref())
            .map_err(|err| self.fatal(start, err.to_string()))?
            .to_string();

        let mut attributes = Vec::new();
        for attr in e.attributes() {
            let attr = attr.map_err(|err| self.fatal(start, err.to_string()))?;
            let key = std::str::from_utf8(attr.key.as_ref())
                .map_err(|err| self.fatal(start, err.to_string()))?
                .to_string();
            let value = attr
                .unescape_value()
                .map_err(|err| self.fatal(start, err.to_string()))?;
            if let Some(bad) = value.chars().find(|&c| !is_xml_char(c)) {
                return Err(self.fatal(
                    start,
                    format!("invalid character U+{:04X} in attribute `{key}`", bad as u32),
                ));
            }
            attributes.push((key, value.into_owned()));
        }

        self.depth += 1;
        self.handler.start_element(&name, &attributes, line);
        Ok(())
    }

    fn end_element(&mut self, start: usize, line: u32) -> Result<()> {
        if self.depth == 0 {
            return Err(self.fatal(start, "end tag without a matching start tag"));
        }
        self.depth -= 1;
        self.handler.end_element(line);
        Ok(())
    }

    fn characters(&mut self, text: &str, start: usize) -> Result<()> {
        if let Some((offset, bad)) = text.char_indices().find(|&(_, c)| !is_xml_char(c)) {
            return Err(self.fatal(
                start + offset,
                format!("invalid character U+{:04X} in text", bad as u32),
            ));
        }
        if self.depth == 0 {
            if text.chars().all(char::is_whitespace) {
                return Ok(());
            }
            return Err(self.fatal(start, "character data outside the root element"));
        }
        self.handler.characters(text);
        Ok(())
    }

    /// Resolves `&name;` to its replacement text. Only the five predefined
    /// entities and character references are known.
    fn resolve_reference(&self, name: &str, start: usize) -> Result<Cow<'static, str>> {
        if let Some(resolved) = resolve_xml_entity(name) {
            return Ok(Cow::Borrowed(resolved));
        }

        if let Some(rest) = name.strip_prefix('#') {
            let code = match rest.strip_prefix('x') {
                Some(hex) => u32::from_str_radix(hex, 16).ok(),
                None => rest.parse::<u32>().ok(),
            };
            return match code.and_then(char::from_u32) {
                Some(ch) if is_xml_char(ch) => Ok(Cow::Owned(ch.to_string())),
                _ => Err(self.fatal(start, format!("invalid character reference &{name};"))),
            };
        }

        Err(self.fatal(start, format!("unknown entity reference &{name};")))
    }

    fn position(&self) -> usize {
        self.clamp(self.reader.buffer_position())
    }

    fn clamp(&self, position: u64) -> usize {
        usize::try_from(position).map_or(self.input.len(), |p| p.min(self.input.len()))
    }

    fn fatal(&self, offset: usize, message: impl Into<String>) -> Error {
        Error::interrupted(message, locate(self.input, offset))
    }
}

/// Incremental 1-based line counter over the input buffer.
struct LineTracker<'a> {
    input: &'a [u8],
    scanned: usize,
    line: u32,
}

impl<'a> LineTracker<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            scanned: 0,
            line: 1,
        }
    }

    /// Counts the newlines between the last position and `position` and
    /// returns the line `position` is on.
    fn advance_to(&mut self, position: usize) -> u32 {
        if position > self.scanned {
            let newlines = memchr::memchr_iter(b'\n', &self.input[self.scanned..position]).count();
            self.line = self
                .line
                .saturating_add(u32::try_from(newlines).unwrap_or(u32::MAX));
            self.scanned = position;
        }
        self.line
    }
}

/// Computes line and column of a byte offset.
fn locate(input: &[u8], offset: usize) -> SourceLocation {
    let offset = offset.min(input.len());
    let before = &input[..offset];
    let newlines = memchr::memchr_iter(b'\n', before).count();
    let line_start = memchr::memrchr(b'\n', before).map_or(0, |pos| pos + 1);
    let column = String::from_utf8_lossy(&before[line_start..]).chars().count() + 1;
    SourceLocation {
        line: u32::try_from(newlines + 1).unwrap_or(u32::MAX),
        column: u32::try_from(column).unwrap_or(u32::MAX),
        byte_offset: offset,
    }
}

/// XML 1.0 §2.2 `Char` production.
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\u{9}' | '\u{A}' | '\u{D}' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}
