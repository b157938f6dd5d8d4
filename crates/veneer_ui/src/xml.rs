//! # XML Sink
//!
//! Every dimension writes itself through [`XmlSink`]: open a tag, add
//! attributes, nest children, close. Two sinks ship with the crate:
//!
//! - [`XmlWriter`] renders indented XML text.
//! - [`ElementBuilder`] collects an [`Element`] tree in memory.
//!
//! [`Element`] is also the input format for turning parsed skin markup back
//! into nodes, so whatever reads skin files only has to produce elements.

use std::fmt::Write as _;
use std::str::FromStr;

use crate::error::{DimensionError, DimensionResult};

/// Receiver for serialized dimensions.
///
/// Calls must nest: every `open_tag` is matched by one `close_tag`, and
/// attributes belong to the most recently opened tag that has no children yet.
pub trait XmlSink {
    /// Starts a new element.
    fn open_tag(&mut self, name: &str);

    /// Adds an attribute to the element opened last.
    fn attribute(&mut self, key: &str, value: &str);

    /// Ends the innermost open element.
    fn close_tag(&mut self);
}

// =============================================================================
// Text writer
// =============================================================================

/// Writes indented XML text.
#[derive(Debug, Default)]
pub struct XmlWriter {
    out: String,
    stack: Vec<String>,
    /// The last opened tag still accepts attributes.
    tag_open: bool,
}

impl XmlWriter {
    /// Creates an empty writer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the text written so far.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.out
    }

    /// Consumes the writer and returns its text.
    #[must_use]
    pub fn finish(self) -> String {
        self.out
    }

    fn indent(&mut self) {
        for _ in 0..self.stack.len() {
            self.out.push_str("  ");
        }
    }

    fn seal_open_tag(&mut self) {
        if self.tag_open {
            self.out.push_str(">\n");
            self.tag_open = false;
        }
    }
}

impl XmlSink for XmlWriter {
    fn open_tag(&mut self, name: &str) {
        self.seal_open_tag();
        self.indent();
        self.out.push('<');
        self.out.push_str(name);
        self.stack.push(name.to_owned());
        self.tag_open = true;
    }

    fn attribute(&mut self, key: &str, value: &str) {
        if !self.tag_open {
            tracing::warn!("attribute `{}` written outside an open tag, ignored", key);
            return;
        }
        let _ = write!(self.out, " {}=\"{}\"", key, escape(value));
    }

    fn close_tag(&mut self) {
        let Some(name) = self.stack.pop() else {
            tracing::warn!("close_tag without a matching open_tag");
            return;
        };
        if self.tag_open {
            self.out.push_str("/>\n");
            self.tag_open = false;
        } else {
            self.indent();
            let _ = writeln!(self.out, "</{name}>");
        }
    }
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\n' => escaped.push_str("&#10;"),
            '\r' => escaped.push_str("&#13;"),
            '\t' => escaped.push_str("&#9;"),
            c => escaped.push(c),
        }
    }
    escaped
}

// =============================================================================
// Element tree
// =============================================================================

/// A parsed element: a name, its attributes in document order, and children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Element name.
    pub name: String,
    /// Attributes in document order.
    pub attributes: Vec<(String, String)>,
    /// Child elements in document order.
    pub children: Vec<Element>,
}

impl Element {
    /// Creates an element with no attributes or children.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds an attribute.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Adds a child element.
    #[must_use]
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Returns the value of an attribute, if present.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the value of an attribute that must be present.
    ///
    /// # Errors
    ///
    /// Returns [`DimensionError::MissingAttribute`] if it is absent.
    pub fn required(&self, key: &'static str) -> DimensionResult<&str> {
        self.attribute(key)
            .ok_or_else(|| DimensionError::MissingAttribute {
                element: self.name.clone(),
                attribute: key,
            })
    }

    /// Parses a required attribute.
    ///
    /// # Errors
    ///
    /// Returns an error if the attribute is absent or does not parse.
    pub fn parse_required<T: FromStr>(&self, key: &'static str) -> DimensionResult<T> {
        let raw = self.required(key)?;
        self.parse_value(key, raw)
    }

    /// Parses an optional attribute, using `default` when it is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the attribute is present but does not parse.
    pub fn parse_or<T: FromStr>(&self, key: &'static str, default: T) -> DimensionResult<T> {
        match self.attribute(key) {
            Some(raw) => self.parse_value(key, raw),
            None => Ok(default),
        }
    }

    /// Returns an attribute as an owned string, treating empty as absent.
    #[must_use]
    pub fn optional_string(&self, key: &str) -> Option<String> {
        self.attribute(key)
            .filter(|value| !value.is_empty())
            .map(str::to_owned)
    }

    /// Builds an [`DimensionError::InvalidAttribute`] for this element.
    #[must_use]
    pub fn invalid(&self, attribute: &'static str, value: &str) -> DimensionError {
        DimensionError::InvalidAttribute {
            element: self.name.clone(),
            attribute,
            value: value.to_owned(),
        }
    }

    /// Fails unless this element is named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`DimensionError::UnexpectedElement`] on a mismatch.
    pub fn expect_name(&self, name: &'static str) -> DimensionResult<()> {
        if self.name == name {
            Ok(())
        } else {
            Err(DimensionError::UnexpectedElement {
                expected: name,
                found: self.name.clone(),
            })
        }
    }

    /// Replays this element and its children into `sink`.
    pub fn write_to(&self, sink: &mut dyn XmlSink) {
        sink.open_tag(&self.name);
        for (key, value) in &self.attributes {
            sink.attribute(key, value);
        }
        for child in &self.children {
            child.write_to(sink);
        }
        sink.close_tag();
    }

    fn parse_value<T: FromStr>(&self, key: &'static str, raw: &str) -> DimensionResult<T> {
        raw.trim().parse::<T>().map_err(|_| self.invalid(key, raw))
    }
}

/// Collects sink calls into [`Element`] trees.
#[derive(Debug, Default)]
pub struct ElementBuilder {
    stack: Vec<Element>,
    roots: Vec<Element>,
}

impl ElementBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every completed top-level element.
    #[must_use]
    pub fn finish(self) -> Vec<Element> {
        self.roots
    }

    /// Returns the first completed top-level element.
    #[must_use]
    pub fn into_root(self) -> Option<Element> {
        self.roots.into_iter().next()
    }
}

impl XmlSink for ElementBuilder {
    fn open_tag(&mut self, name: &str) {
        self.stack.push(Element::new(name));
    }

    fn attribute(&mut self, key: &str, value: &str) {
        match self.stack.last_mut() {
            Some(element) if element.children.is_empty() => {
                element.attributes.push((key.to_owned(), value.to_owned()));
            }
            _ => tracing::warn!("attribute `{}` written outside an open tag, ignored", key),
        }
    }

    fn close_tag(&mut self) {
        let Some(element) = self.stack.pop() else {
            tracing::warn!("close_tag without a matching open_tag");
            return;
        };
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(element),
            None => self.roots.push(element),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_sample(sink: &mut dyn XmlSink) {
        sink.open_tag("OperatorDim");
        sink.attribute("op", "Add");
        sink.open_tag("LiteralDim");
        sink.attribute("value", "10");
        sink.close_tag();
        sink.open_tag("FontDim");
        sink.attribute("string", "a<b & \"c\"");
        sink.close_tag();
        sink.close_tag();
    }

    #[test]
    fn test_writer_nests_and_escapes() {
        let mut writer = XmlWriter::new();
        write_sample(&mut writer);

        let expected = "<OperatorDim op=\"Add\">\n  <LiteralDim value=\"10\"/>\n  <FontDim string=\"a&lt;b &amp; &quot;c&quot;\"/>\n</OperatorDim>\n";
        assert_eq!(writer.finish(), expected);
    }

    #[test]
    fn test_writer_encodes_whitespace_in_attributes() {
        let mut writer = XmlWriter::new();
        writer.open_tag("FontDim");
        writer.attribute("string", "one\ntwo\r\tthree");
        writer.close_tag();

        assert_eq!(
            writer.finish(),
            "<FontDim string=\"one&#10;two&#13;&#9;three\"/>\n"
        );
    }

    #[test]
    fn test_builder_collects_elements() {
        let mut builder = ElementBuilder::new();
        write_sample(&mut builder);

        let root = builder.into_root().unwrap();
        assert_eq!(root.name, "OperatorDim");
        assert_eq!(root.attribute("op"), Some("Add"));
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[1].attribute("string"), Some("a<b & \"c\""));
    }

    #[test]
    fn test_replay_matches_direct_write() {
        let mut builder = ElementBuilder::new();
        write_sample(&mut builder);
        let root = builder.into_root().unwrap();

        let mut direct = XmlWriter::new();
        write_sample(&mut direct);
        let mut replayed = XmlWriter::new();
        root.write_to(&mut replayed);

        assert_eq!(direct.finish(), replayed.finish());
    }

    #[test]
    fn test_attribute_helpers() {
        let element = Element::new("LiteralDim")
            .with_attribute("value", "12.5")
            .with_attribute("bad", "twelve");

        assert_eq!(element.parse_required::<f32>("value"), Ok(12.5));
        assert_eq!(element.parse_or::<f32>("padding", 3.0), Ok(3.0));
        assert!(matches!(
            element.parse_required::<f32>("bad"),
            Err(DimensionError::InvalidAttribute { attribute: "bad", .. })
        ));
        assert!(matches!(
            element.required("missing"),
            Err(DimensionError::MissingAttribute { attribute: "missing", .. })
        ));
        assert!(element.expect_name("UnifiedDim").is_err());
    }
}
