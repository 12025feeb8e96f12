//! Serializer integration tests for xmlaccess.
//!
//! Element literals and parsed documents are turned back into text and
//! compared byte for byte.

#![allow(clippy::unwrap_used)]

use pretty_assertions::assert_eq;
use xmlaccess::serial::{document, document_with_options, SerializeOptions, DECLARATION};
use xmlaccess::{parse, Accessor, Element, Error};

fn without_declaration() -> SerializeOptions {
    SerializeOptions::default().declaration(false)
}

fn leaf(name: &str, text: &str, key: &str, value: &str) -> Element {
    Element::new(name).with_text(text).with_attribute(key, value)
}

#[test]
fn test_text_only() {
    let element = leaf("name", "text", "key", "value");
    assert_eq!(
        document(&Accessor::from(element)).unwrap(),
        r#"<?xml version="1.0" encoding="UTF-8"?><name key="value">text</name>"#
    );
}

#[test]
fn test_children_only() {
    let element = Element::new("name").with_attribute("key", "value").with_children([
        leaf("c_name1", "c_text1", "c_key1", "c_value1"),
        leaf("c_name2", "c_text2", "c_key2", "c_value2"),
    ]);
    assert_eq!(
        document(&Accessor::from(element)).unwrap(),
        format!(
            "{DECLARATION}{}",
            r#"<name key="value"><c_name1 c_key1="c_value1">c_text1</c_name1><c_name2 c_key2="c_value2">c_text2</c_name2></name>"#
        )
    );
}

#[test]
fn test_text_and_nested_children() {
    let great_grandchild = leaf("ggc_name1", "ggc_text1", "ggc_key1", "ggc_value1");
    let grandchild = leaf("gc_name1", "gc_text1", "gc_key1", "gc_value1").with_child(great_grandchild);
    let element = leaf("name", "text", "key", "value").with_children([
        leaf("c_name1", "c_text1", "c_key1", "c_value1"),
        leaf("c_name2", "c_text2", "c_key2", "c_value2").with_child(grandchild),
    ]);
    assert_eq!(
        document_with_options(&Accessor::from(element), &without_declaration()).unwrap(),
        concat!(
            r#"<name key="value">text<c_name1 c_key1="c_value1">c_text1</c_name1>"#,
            r#"<c_name2 c_key2="c_value2">c_text2<gc_name1 gc_key1="gc_value1">gc_text1"#,
            r#"<ggc_name1 ggc_key1="ggc_value1">ggc_text1</ggc_name1></gc_name1></c_name2></name>"#,
        )
    );
}

#[test]
fn test_escaping_characters() {
    let element = Element::new("name")
        .with_text("me&you")
        .with_child(Element::new("child").with_text("& < > &"));
    assert_eq!(
        document(&Accessor::from(element)).unwrap(),
        format!("{DECLARATION}<name>me&amp;you<child>&amp; &lt; &gt; &amp;</child></name>")
    );
}

#[test]
fn test_no_extra_spaces_without_attributes() {
    assert_eq!(
        document(&Accessor::from(Element::new("name"))).unwrap(),
        format!("{DECLARATION}<name></name>")
    );

    let element = leaf("name", "text", "key", "value")
        .with_child(Element::new("name1"))
        .with_child(Element::new("name2").with_text("text2"));
    assert_eq!(
        document(&Accessor::from(element)).unwrap(),
        format!(
            "{DECLARATION}{}",
            r#"<name key="value">text<name1></name1><name2>text2</name2></name>"#
        )
    );
}

#[test]
fn test_without_declaration() {
    assert_eq!(
        document_with_options(&Accessor::from(Element::new("name")), &without_declaration())
            .unwrap(),
        "<name></name>"
    );
    assert_eq!(
        document_with_options(
            &Accessor::from(leaf("name", "text", "key", "value")),
            &without_declaration()
        )
        .unwrap(),
        r#"<name key="value">text</name>"#
    );
}

#[test]
fn test_failure_cannot_be_serialized() {
    let xml = parse("<a>").child("a");
    let err = document(&xml).unwrap_err();
    let Error::Serialization { source } = &err else {
        panic!("expected a serialization error, got {err:?}");
    };
    assert!(matches!(**source, Error::InterruptedParse { .. }));
}

#[test]
fn test_parsed_document_is_compacted() {
    let xml = parse("<?xml version=\"1.0\"?>\n<!-- lead -->\n<a x='1'><b/><?pi data?><c>t</c></a>\n");
    assert_eq!(
        document(&xml).unwrap(),
        format!("{DECLARATION}<a x=\"1\"><b></b><c>t</c></a>")
    );
}

#[test]
fn test_selection_serializes_only_selected_elements() {
    let xml = parse("<r><i>1</i><j/><i>2</i></r>");
    assert_eq!(
        document_with_options(&xml.path(["r", "i"]), &without_declaration()).unwrap(),
        "<i>1</i><i>2</i>"
    );
    assert_eq!(xml.path(["r", "i"]).to_string(), "<i>1</i><i>2</i>");
}

#[test]
fn test_attribute_whitespace_survives_reparse() {
    let element = Element::new("a").with_attribute("v", "line1\nline2\tend\"q\"");
    let text = document(&Accessor::from(element)).unwrap();
    let reparsed = parse(&text);
    assert_eq!(
        reparsed.child("a").attribute("v").as_deref(),
        Some("line1\nline2\tend\"q\"")
    );
}

#[test]
fn test_root_element_with_text_attribute_and_two_children() {
    let element = Element::new("RootElement")
        .with_text("text")
        .with_attribute("key", "value")
        .with_child(Element::new("ChildElement"))
        .with_child(Element::new("ChildElement"));
    assert_eq!(
        document(&Accessor::from(element)).unwrap(),
        r#"<?xml version="1.0" encoding="UTF-8"?><RootElement key="value">text<ChildElement></ChildElement><ChildElement></ChildElement></RootElement>"#
    );
}
