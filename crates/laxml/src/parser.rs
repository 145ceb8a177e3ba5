//! Tree builder driving the tag scanner over a whole document.

use crate::context::ParseContext;
use crate::error::{Error, ParseResult, Result, Warning, WarningKind};
use crate::options::{CloseTagPolicy, ParseOptions};
use crate::scanner::{ScannedTag, Tag, TagKind, scan_tag};
use crate::types::{Attributes, Comment, Document, Element, Node, Position, Text};
use tracing::{debug, trace};

/// Parse a document with the default options.
///
/// Malformed nesting never fails: it is repaired and reported through
/// [`Document::warnings`]. Only lexical faults such as an unterminated
/// comment return an [`Error`].
///
/// ```
/// let document = laxml::parse("<p>one<b>two</p>").unwrap();
/// let p = document.children()[0].as_element().unwrap();
/// assert_eq!(p.children.len(), 2);
/// assert_eq!(document.warnings[0].message(), "Unclosed tag: b");
/// ```
pub fn parse(content: &str) -> Result<Document> {
    parse_with_options(content, &ParseOptions::default())
}

pub fn parse_with_options(content: &str, options: &ParseOptions) -> Result<Document> {
    TreeBuilder::new(content, options.close_tags).build()
}

/// Parse and record diagnostics in `ctx`.
///
/// Warnings land in `ctx` on success. On failure the fault is both added to
/// `ctx` and returned.
pub fn parse_with_context(
    content: &str,
    options: &ParseOptions,
    ctx: &mut ParseContext,
) -> ParseResult<Document> {
    match parse_with_options(content, options) {
        Ok(document) => {
            for warning in &document.warnings {
                ctx.add_diagnostic(warning.to_diagnostic(options.file_id));
            }
            Ok(document)
        }
        Err(err) => {
            let diagnostic = err.to_diagnostic(options.file_id);
            ctx.add_diagnostic(diagnostic.clone());
            Err(vec![diagnostic])
        }
    }
}

/// An element whose close tag has not been seen yet.
struct BuildNode {
    name: String,
    attrs: Attributes,
    pos_open: Position,
    children: Vec<Node>,
}

impl BuildNode {
    fn finish(self, pos_close: Option<Position>) -> Element {
        Element {
            name: self.name,
            attrs: self.attrs,
            children: self.children,
            pos_open: Some(self.pos_open),
            pos_close,
            self_closing: false,
        }
    }
}

struct TreeBuilder<'a> {
    source: &'a str,
    policy: CloseTagPolicy,
    /// Top-level nodes.
    root: Vec<Node>,
    /// Open elements, innermost last.
    open: Vec<BuildNode>,
    warnings: Vec<Warning>,
}

impl<'a> TreeBuilder<'a> {
    fn new(source: &'a str, policy: CloseTagPolicy) -> Self {
        Self {
            source,
            policy,
            root: Vec::new(),
            open: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn build(mut self) -> Result<Document> {
        let source = self.source;
        let bytes = source.as_bytes();
        debug!(bytes = bytes.len(), policy = ?self.policy, "parsing document");

        let mut offset = 0;
        while offset < bytes.len() {
            let tag_start = memchr::memchr(b'<', &bytes[offset..])
                .map_or(bytes.len(), |i| offset + i);
            self.push_text(offset, tag_start);
            if tag_start == bytes.len() {
                break;
            }

            let ScannedTag { tag, warnings } = scan_tag(source, tag_start)?;
            trace!(
                name = %tag.name,
                kind = ?tag.kind,
                start = tag.position.start,
                end = tag.position.end,
                "scanned tag"
            );
            self.warnings.extend(warnings);
            if !tag.terminated {
                debug!(name = %tag.name, "tag cut off by end of input");
                self.warnings.push(Warning::new(
                    WarningKind::UnterminatedTag {
                        name: tag.name.clone(),
                    },
                    tag.position,
                ));
            }
            offset = tag.position.end;
            self.handle_tag(tag)?;
        }

        self.finish()
    }

    fn handle_tag(&mut self, tag: Tag) -> Result<()> {
        let Tag {
            name,
            attrs,
            kind,
            position,
            ..
        } = tag;
        match kind {
            TagKind::Close => return self.close(name, position),
            TagKind::Comment { text } => self.current_children().push(Node::Comment(Comment {
                value: text,
                position,
            })),
            TagKind::SelfClosing => self.current_children().push(Node::Element(Element {
                name,
                attrs,
                children: Vec::new(),
                pos_open: Some(position),
                pos_close: None,
                self_closing: true,
            })),
            TagKind::Open => self.open.push(BuildNode {
                name,
                attrs,
                pos_open: position,
                children: Vec::new(),
            }),
        }
        Ok(())
    }

    fn close(&mut self, name: String, position: Position) -> Result<()> {
        match self.policy {
            CloseTagPolicy::Strict => match self.open.last() {
                None => Err(Error::UnmatchedCloseTag {
                    name,
                    offset: position.start,
                }),
                Some(top) if top.name != name => Err(Error::MismatchedCloseTag {
                    expected: top.name.clone(),
                    found: name,
                    offset: position.start,
                }),
                Some(_) => {
                    self.pop_into_parent(Some(position));
                    Ok(())
                }
            },
            CloseTagPolicy::Recover => {
                let Some(depth) = self.open.iter().rposition(|node| node.name == name) else {
                    debug!(%name, offset = position.start, "ignoring unmatched close tag");
                    self.warnings
                        .push(Warning::new(WarningKind::UnmatchedTag { name }, position));
                    return Ok(());
                };
                while self.open.len() > depth + 1 {
                    self.close_implicitly();
                }
                self.pop_into_parent(Some(position));
                Ok(())
            }
        }
    }

    /// Close the innermost element without a close tag, with a warning at
    /// its open tag.
    fn close_implicitly(&mut self) {
        if let Some(node) = self.open.last() {
            debug!(name = %node.name, "closing element implicitly");
            self.warnings.push(Warning::new(
                WarningKind::UnclosedTag {
                    name: node.name.clone(),
                },
                node.pos_open,
            ));
        }
        self.pop_into_parent(None);
    }

    fn pop_into_parent(&mut self, pos_close: Option<Position>) {
        if let Some(node) = self.open.pop() {
            let element = node.finish(pos_close);
            self.current_children().push(Node::Element(element));
        }
    }

    fn current_children(&mut self) -> &mut Vec<Node> {
        match self.open.last_mut() {
            Some(node) => &mut node.children,
            None => &mut self.root,
        }
    }

    fn push_text(&mut self, start: usize, end: usize) {
        let raw = &self.source[start..end];
        let trimmed_start = raw.trim_start();
        let value = trimmed_start.trim_end();
        if value.is_empty() {
            return;
        }
        let text_start = start + (raw.len() - trimmed_start.len());
        let position = Position::new(text_start, text_start + value.len());
        self.current_children().push(Node::Text(Text {
            value: value.to_string(),
            position,
        }));
    }

    fn finish(mut self) -> Result<Document> {
        // Only the innermost element is reported; the rest fold silently.
        if let Some(node) = self.open.last() {
            self.warnings.push(Warning::new(
                WarningKind::UnclosedTag {
                    name: node.name.clone(),
                },
                node.pos_open,
            ));
        }
        while !self.open.is_empty() {
            self.pop_into_parent(None);
        }

        debug!(
            nodes = self.root.len(),
            warnings = self.warnings.len(),
            "parse complete"
        );
        Ok(Document {
            root: Node::Element(Element::root(self.root)),
            warnings: self.warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AttributeValue;
    use laxml_source_map::FileId;

    fn element(node: &Node) -> &Element {
        node.as_element().expect("expected an element")
    }

    fn kinds(document: &Document) -> Vec<&WarningKind> {
        document.warnings.iter().map(|w| &w.kind).collect()
    }

    #[test]
    fn test_parse_simple_element() {
        let doc = parse(r#"<a href="x">link</a>"#).unwrap();
        assert!(doc.warnings.is_empty());
        assert_eq!(doc.children().len(), 1);

        let a = element(&doc.children()[0]);
        assert_eq!(a.name, "a");
        assert_eq!(a.get_attribute("href"), Some("x"));
        assert_eq!(a.pos_open, Some(Position::new(0, 12)));
        assert_eq!(a.pos_close, Some(Position::new(16, 20)));
        assert!(!a.self_closing);

        let text = a.children[0].as_text().unwrap();
        assert_eq!(text.value, "link");
        assert_eq!(text.position, Position::new(12, 16));
    }

    #[test]
    fn test_root_shape() {
        let doc = parse("").unwrap();
        let root = element(&doc.root);
        assert!(root.is_root());
        assert_eq!(root.name, "");
        assert!(root.children.is_empty());
        assert!(doc.warnings.is_empty());
    }

    #[test]
    fn test_whitespace_only_text_is_dropped() {
        let doc = parse("  \n<a>\n\t</a>\n").unwrap();
        assert_eq!(doc.children().len(), 1);
        assert!(element(&doc.children()[0]).children.is_empty());
    }

    #[test]
    fn test_text_is_trimmed_with_position() {
        let source = "<p>  hello world \n</p>";
        let doc = parse(source).unwrap();
        let text = doc.children()[0].children()[0].as_text().unwrap();
        assert_eq!(text.value, "hello world");
        assert_eq!(text.position.slice(source), "hello world");
    }

    #[test]
    fn test_top_level_text_only() {
        let doc = parse("just text").unwrap();
        let text = doc.children()[0].as_text().unwrap();
        assert_eq!(text.value, "just text");
        assert_eq!(text.position, Position::new(0, 9));
    }

    #[test]
    fn test_self_closing_and_comment() {
        let doc = parse("<a><br/><!-- note --></a>").unwrap();
        let a = element(&doc.children()[0]);
        let br = element(&a.children[0]);
        assert!(br.self_closing);
        assert!(br.pos_close.is_none());
        assert_eq!(br.pos_open, Some(Position::new(3, 8)));

        let comment = a.children[1].as_comment().unwrap();
        assert_eq!(comment.value, "note");
        assert_eq!(comment.position, Position::new(8, 21));
    }

    #[test]
    fn test_unclosed_inner_element_is_closed_by_outer() {
        let doc = parse("<a><b></a>").unwrap();
        let a = element(&doc.children()[0]);
        assert_eq!(a.pos_close, Some(Position::new(6, 10)));
        let b = element(&a.children[0]);
        assert_eq!(b.name, "b");
        assert!(b.pos_close.is_none());
        assert_eq!(
            kinds(&doc),
            vec![&WarningKind::UnclosedTag { name: "b".into() }]
        );
        assert_eq!(doc.warnings[0].position, Position::new(3, 6));
    }

    #[test]
    fn test_unmatched_close_tag_is_ignored() {
        let doc = parse("<a></b></a>").unwrap();
        let a = element(&doc.children()[0]);
        assert!(a.children.is_empty());
        assert_eq!(a.pos_close, Some(Position::new(7, 11)));
        assert_eq!(
            kinds(&doc),
            vec![&WarningKind::UnmatchedTag { name: "b".into() }]
        );
        assert_eq!(doc.warnings[0].position, Position::new(3, 7));
    }

    #[test]
    fn test_stray_close_tag_at_top_level() {
        let doc = parse("</x>text").unwrap();
        assert_eq!(doc.children().len(), 1);
        assert_eq!(
            kinds(&doc),
            vec![&WarningKind::UnmatchedTag { name: "x".into() }]
        );
    }

    #[test]
    fn test_close_tag_closes_nearest_match() {
        let doc = parse("<a><a><b></a>x</a>").unwrap();
        let outer = element(&doc.children()[0]);
        assert_eq!(outer.pos_close, Some(Position::new(14, 18)));
        let inner = element(&outer.children[0]);
        assert_eq!(inner.pos_close, Some(Position::new(9, 13)));
        assert_eq!(element(&inner.children[0]).name, "b");
        assert_eq!(outer.children[1].as_text().unwrap().value, "x");
        assert_eq!(doc.warnings.len(), 1);
    }

    #[test]
    fn test_unclosed_at_eof_reports_innermost_only() {
        let doc = parse("<a><b><c>text").unwrap();
        assert_eq!(
            kinds(&doc),
            vec![&WarningKind::UnclosedTag { name: "c".into() }]
        );
        assert_eq!(doc.warnings[0].position, Position::new(6, 9));

        let a = element(&doc.children()[0]);
        let b = element(&a.children[0]);
        let c = element(&b.children[0]);
        assert_eq!(c.children[0].as_text().unwrap().value, "text");
        assert!(a.pos_close.is_none() && b.pos_close.is_none() && c.pos_close.is_none());
    }

    #[test]
    fn test_unterminated_tag_at_eof() {
        let doc = parse("<a>text<b x=1").unwrap();
        assert_eq!(
            kinds(&doc),
            vec![
                &WarningKind::UnterminatedTag { name: "b".into() },
                &WarningKind::UnclosedTag { name: "b".into() },
            ]
        );
        let a = element(&doc.children()[0]);
        let b = element(&a.children[1]);
        assert_eq!(b.pos_open, Some(Position::new(7, 13)));
        assert_eq!(b.attr("x"), Some(&AttributeValue::from("1")));
    }

    #[test]
    fn test_duplicate_attribute_warning_passes_through() {
        let doc = parse(r#"<a x="1" x="2"/>"#).unwrap();
        assert_eq!(
            kinds(&doc),
            vec![&WarningKind::DuplicateAttribute { key: "x".into() }]
        );
        assert_eq!(element(&doc.children()[0]).get_attribute("x"), Some("2"));
    }

    #[test]
    fn test_lexical_faults_abort() {
        assert_eq!(
            parse("<a><!-- never").unwrap_err(),
            Error::UnterminatedComment { offset: 3 }
        );
        assert_eq!(
            parse("<!DOCTYPE html>").unwrap_err(),
            Error::MalformedCommentOpen { offset: 0 }
        );
        assert!(matches!(
            parse("<a b='x>").unwrap_err(),
            Error::UnterminatedAttributeValue { .. }
        ));
    }

    #[test]
    fn test_strict_mismatch_fails() {
        let err = parse_with_options("<a><b></a>", &ParseOptions::strict()).unwrap_err();
        assert_eq!(
            err,
            Error::MismatchedCloseTag {
                expected: "b".into(),
                found: "a".into(),
                offset: 6,
            }
        );
    }

    #[test]
    fn test_strict_unmatched_fails() {
        let err = parse_with_options("</a>", &ParseOptions::strict()).unwrap_err();
        assert_eq!(
            err,
            Error::UnmatchedCloseTag {
                name: "a".into(),
                offset: 0,
            }
        );
    }

    #[test]
    fn test_strict_accepts_balanced_input() {
        let doc = parse_with_options("<a><b/></a>", &ParseOptions::strict()).unwrap();
        assert!(doc.warnings.is_empty());
    }

    #[test]
    fn test_strict_still_warns_at_eof() {
        let doc = parse_with_options("<a>", &ParseOptions::strict()).unwrap();
        assert_eq!(
            kinds(&doc),
            vec![&WarningKind::UnclosedTag { name: "a".into() }]
        );
    }

    #[test]
    fn test_parse_with_context_records_warnings() {
        let mut ctx = ParseContext::new();
        let options = ParseOptions::new().with_file_id(FileId(5));
        let doc = parse_with_context("<a></b>", &options, &mut ctx).unwrap();
        assert_eq!(doc.warnings.len(), 2);
        assert_eq!(ctx.warning_count(), 2);
        assert!(!ctx.has_errors());
        let location = ctx.diagnostics()[0].location.unwrap();
        assert_eq!(location.file_id, FileId(5));
    }

    #[test]
    fn test_parse_with_context_returns_fault() {
        let mut ctx = ParseContext::new();
        let errors = parse_with_context("<!-x", &ParseOptions::default(), &mut ctx).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code.as_deref(), Some("L-1-2"));
        assert!(ctx.has_errors());
    }
}
