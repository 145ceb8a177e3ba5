//! Error-tolerant markup parsing with source positions.
//!
//! This crate reads loosely written XML or HTML into a tree without ever
//! rejecting bad nesting. Unclosed elements, stray close tags, duplicate
//! attributes and tags cut off by the end of input are repaired and
//! reported as [`Warning`]s. Only lexical faults (an unterminated comment
//! or quoted value, or a `<!` that does not open a comment) stop the parse.
//!
//! # Overview
//!
//! - [`scan_tag`]: read one tag at a byte offset
//! - [`parse`]: build a [`Document`] from a whole string
//! - [`walk`] and [`Node::descendants`]: visit the tree in pre-order
//! - [`parse_with_context`]: collect warnings and faults as diagnostics
//!
//! # Example
//!
//! ```rust
//! use laxml::parse;
//!
//! let document = parse(r#"<ul class="menu">
//!   <li><a href="/">Home</a>
//!   <li><input disabled>
//! </ul>"#).unwrap();
//!
//! let ul = document.children()[0].as_element().unwrap();
//! assert_eq!(ul.get_attribute("class"), Some("menu"));
//! assert_eq!(ul.get_children("li").len(), 1);
//!
//! let names: Vec<_> = document.root.descendants().filter_map(|n| n.name()).collect();
//! assert_eq!(names, ["", "ul", "li", "a", "li", "input"]);
//! // `</ul>` closes the input and both list items implicitly.
//! assert_eq!(document.warnings.len(), 3);
//! ```
//!
//! # Positions
//!
//! Every position is a half-open byte range into the parsed string:
//!
//! ```rust
//! let source = r#"<a x="1"/>"#;
//! let document = laxml::parse(source).unwrap();
//! let a = document.children()[0].as_element().unwrap();
//!
//! assert_eq!(a.pos_open.unwrap().slice(source), source);
//! assert_eq!(a.attrs["x"].position.slice(source), r#"x="1""#);
//! ```

pub mod context;
pub mod error;
pub mod options;
pub mod parser;
pub mod scanner;
pub mod types;
pub mod walk;

pub use context::ParseContext;
pub use error::{Error, ParseResult, Result, Warning, WarningKind};
pub use laxml_source_map::{FileId, SourceInfo};
pub use options::{CloseTagPolicy, ParseOptions};
pub use parser::{parse, parse_with_context, parse_with_options};
pub use scanner::{ScannedTag, Tag, TagKind, scan_tag};
pub use types::{
    Attribute, AttributeValue, Attributes, Comment, Document, Element, Node, Position, Text,
};
pub use walk::{PreOrder, walk, walk_with_depth};
