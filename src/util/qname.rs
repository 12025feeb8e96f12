//! `QName` (qualified name) handling.
//!
//! A `QName` is a name of the form `prefix:localname` or just `localname`.
//! The tree builder uses these helpers to drop prefixes when a parse is
//! configured to ignore namespaces.
//!
//! See <https://www.w3.org/TR/xml-names/#NT-QName>

/// Splits a `QName` into its prefix and local name parts.
///
/// Returns `(Some(prefix), localname)` if the name contains a colon,
/// or `(None, localname)` if it does not. Only the first colon splits.
///
/// # Examples
///
/// ```
/// use xmlaccess::util::qname::split_qname;
///
/// assert_eq!(split_qname("env:Envelope"), (Some("env"), "Envelope"));
/// assert_eq!(split_qname("Body"), (None, "Body"));
/// ```
#[must_use]
pub fn split_qname(qname: &str) -> (Option<&str>, &str) {
    match qname.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, qname),
    }
}

/// Returns the local part of a `QName`, dropping any `prefix:` segment.
#[must_use]
pub fn local_name(qname: &str) -> &str {
    split_qname(qname).1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_qname_with_prefix() {
        assert_eq!(split_qname("xml:lang"), (Some("xml"), "lang"));
    }

    #[test]
    fn test_split_qname_without_prefix() {
        assert_eq!(split_qname("div"), (None, "div"));
    }

    #[test]
    fn test_split_qname_empty() {
        assert_eq!(split_qname(""), (None, ""));
    }

    #[test]
    fn test_split_qname_multiple_colons() {
        assert_eq!(split_qname("a:b:c"), (Some("a"), "b:c"));
    }

    #[test]
    fn test_local_name() {
        assert_eq!(local_name("ns1:ChildElement"), "ChildElement");
        assert_eq!(local_name("xmlns:ns1"), "ns1");
        assert_eq!(local_name("key"), "key");
    }
}
