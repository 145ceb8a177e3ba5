//! Core types for the parsed markup tree.

use crate::error::Warning;
use crate::walk::PreOrder;
use indexmap::IndexMap;
use laxml_source_map::{FileId, SourceInfo};
use serde::{Serialize, Serializer};

/// A half-open `[start, end)` byte span into the parsed document.
///
/// Tags span from `<` to one past `>`, attributes from the first byte of
/// the key to one past the last byte of the value, text nodes cover their
/// trimmed text.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub start: usize,
    pub end: usize,
}

impl Position {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "position {start}..{end} is reversed");
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The source text this position covers, or `""` if it does not fit.
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.start..self.end).unwrap_or_default()
    }

    pub fn to_source_info(self, file_id: FileId) -> SourceInfo {
        SourceInfo::original(file_id, self.start, self.end)
    }
}

/// The value of an attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    /// A value given with `=`, trimmed and with quotes removed.
    Text(String),
    /// A valueless attribute such as `disabled`.
    True,
    /// Reserved for callers building trees by hand; the scanner never
    /// produces it.
    Null,
}

impl AttributeValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            AttributeValue::True | AttributeValue::Null => None,
        }
    }

    pub fn is_true(&self) -> bool {
        matches!(self, AttributeValue::True)
    }
}

impl Serialize for AttributeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AttributeValue::Text(s) => serializer.serialize_str(s),
            AttributeValue::True => serializer.serialize_bool(true),
            AttributeValue::Null => serializer.serialize_none(),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::Text(s.to_string())
    }
}

/// An attribute value with the span of the whole `key="value"` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub value: AttributeValue,
    pub position: Position,
}

/// Attributes in source order. Keys are unique; a repeated key keeps its
/// first slot and takes the last value.
pub type Attributes = IndexMap<String, Attribute>;

/// A node of the parsed tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Element(Element),
    Text(Text),
    Comment(Comment),
}

/// An element, or the synthetic root that holds top-level content.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Tag name; empty for the root.
    pub name: String,
    pub attrs: Attributes,
    pub children: Vec<Node>,
    /// Span of the open tag. `None` only for the root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos_open: Option<Position>,
    /// Span of the matching close tag, when there was one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos_close: Option<Position>,
    /// Written as `<name/>`.
    pub self_closing: bool,
}

/// A run of text between tags, trimmed. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Text {
    pub value: String,
    pub position: Position,
}

/// A `<!-- ... -->` comment. `value` is the trimmed inner text and
/// `position` covers the delimiters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub value: String,
    pub position: Position,
}

impl Element {
    /// The synthetic root: no name, no attributes, no positions.
    pub fn root(children: Vec<Node>) -> Self {
        Self {
            name: String::new(),
            attrs: Attributes::new(),
            children,
            pos_open: None,
            pos_close: None,
            self_closing: false,
        }
    }

    pub fn is_root(&self) -> bool {
        self.pos_open.is_none()
    }

    pub fn attr(&self, key: &str) -> Option<&AttributeValue> {
        self.attrs.get(key).map(|a| &a.value)
    }

    /// Text value of an attribute. `None` for missing or valueless attributes.
    pub fn get_attribute(&self, key: &str) -> Option<&str> {
        self.attr(key).and_then(AttributeValue::as_str)
    }

    pub fn has_attribute(&self, key: &str) -> bool {
        self.attrs.contains_key(key)
    }

    /// Child elements, skipping text and comments.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    pub fn get_children(&self, name: &str) -> Vec<&Element> {
        self.child_elements().filter(|e| e.name == name).collect()
    }

    /// Whether a matching close tag was seen (or the tag closed itself).
    pub fn is_closed(&self) -> bool {
        self.self_closing || self.pos_close.is_some()
    }
}

// Void elements left open nest everything after them, so trees can be far
// deeper than the call stack allows. Drop them with a work-list instead.
impl Drop for Element {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            if let Node::Element(element) = &mut node {
                pending.append(&mut element.children);
            }
        }
    }
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Node::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_comment(&self) -> Option<&Comment> {
        match self {
            Node::Comment(c) => Some(c),
            _ => None,
        }
    }

    /// Children of an element; text and comments have none.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element(e) => &e.children,
            Node::Text(_) | Node::Comment(_) => &[],
        }
    }

    /// Element name. Text and comment nodes have no name.
    pub fn name(&self) -> Option<&str> {
        self.as_element().map(|e| e.name.as_str())
    }

    /// Start position: the open tag for elements, the node span otherwise.
    pub fn position(&self) -> Option<Position> {
        match self {
            Node::Element(e) => e.pos_open,
            Node::Text(t) => Some(t.position),
            Node::Comment(c) => Some(c.position),
        }
    }

    /// Pre-order iterator over this node and everything below it.
    pub fn descendants(&self) -> PreOrder<'_> {
        PreOrder::new(self)
    }
}

/// The result of a successful parse: the root plus the warnings collected
/// on the way, in detection order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub root: Node,
    pub warnings: Vec<Warning>,
}

impl Document {
    /// Top-level nodes.
    pub fn children(&self) -> &[Node] {
        self.root.children()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Visit every node, root first, in pre-order.
    pub fn walk<'a>(&'a self, visit: impl FnMut(&'a Node)) {
        crate::walk::walk(&self.root, visit);
    }

    pub fn into_parts(self) -> (Node, Vec<Warning>) {
        (self.root, self.warnings)
    }
}
