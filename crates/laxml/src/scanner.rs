//! Single-tag scanner.
//!
//! [`scan_tag`] reads exactly one tag (open, close, self-closing, or
//! comment) starting at a `<` and reports where it ended. It never looks
//! past the tag, so the tree builder can drive it over a whole document.

use crate::error::{Error, Result, Warning, WarningKind};
use crate::types::{Attribute, AttributeValue, Attributes, Position};

/// What a scanned tag is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagKind {
    /// `<name ...>`
    Open,
    /// `<name .../>`
    SelfClosing,
    /// `</name>`
    Close,
    /// `<!-- text -->`, with the inner text trimmed.
    Comment { text: String },
}

/// One scanned tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Tag name, possibly empty. Empty for comments.
    pub name: String,
    pub attrs: Attributes,
    pub kind: TagKind,
    /// From the `<` to one past the `>`, or to the end of input when
    /// `terminated` is false.
    pub position: Position,
    /// False when the input ended before the closing `>`.
    pub terminated: bool,
}

impl Tag {
    /// Self-closing, which includes comments.
    pub fn is_closed(&self) -> bool {
        matches!(self.kind, TagKind::SelfClosing | TagKind::Comment { .. })
    }

    pub fn is_comment(&self) -> bool {
        matches!(self.kind, TagKind::Comment { .. })
    }

    pub fn is_close(&self) -> bool {
        matches!(self.kind, TagKind::Close)
    }
}

/// A tag plus the warnings raised while scanning it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedTag {
    pub tag: Tag,
    pub warnings: Vec<Warning>,
}

fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

fn is_tag_end(b: u8) -> bool {
    matches!(b, b'/' | b'>')
}

/// Index of the first byte at or after `from` matching `stop`, or the end
/// of input.
fn find_next(bytes: &[u8], from: usize, stop: impl Fn(u8) -> bool) -> usize {
    let from = from.min(bytes.len());
    bytes[from..]
        .iter()
        .position(|&b| stop(b))
        .map_or(bytes.len(), |i| from + i)
}

/// Scan one tag starting at `offset`, which must hold a `<`.
///
/// ```
/// use laxml::{scan_tag, TagKind};
///
/// let scanned = scan_tag(r#"<img src="a.png"/> tail"#, 0).unwrap();
/// assert_eq!(scanned.tag.name, "img");
/// assert_eq!(scanned.tag.kind, TagKind::SelfClosing);
/// assert_eq!(scanned.tag.position.end, 18);
/// ```
pub fn scan_tag(input: &str, offset: usize) -> Result<ScannedTag> {
    let bytes = input.as_bytes();
    if bytes.get(offset) != Some(&b'<') {
        return Err(Error::ExpectedTagOpen { offset });
    }

    let mut cursor = offset + 1;
    let mut kind = TagKind::Open;
    match bytes.get(cursor) {
        Some(b'!') => return scan_comment(input, offset),
        Some(b'/') => {
            kind = TagKind::Close;
            cursor += 1;
        }
        _ => {}
    }

    let name_end = find_next(bytes, cursor, |b| is_whitespace(b) || is_tag_end(b));
    let name = input[cursor..name_end].to_string();
    cursor = name_end;

    let mut attrs = Attributes::new();
    let mut warnings = Vec::new();
    loop {
        cursor = find_next(bytes, cursor, |b| !is_whitespace(b));
        match bytes.get(cursor) {
            None | Some(b'>' | b'/') => break,
            Some(_) => cursor = scan_attribute(input, cursor, &mut attrs, &mut warnings)?,
        }
    }

    if bytes.get(cursor) == Some(&b'/') && kind == TagKind::Open {
        kind = TagKind::SelfClosing;
    }
    // Anything between a `/` and the next `>` is ignored.
    let terminated = match memchr::memchr(b'>', &bytes[cursor..]) {
        Some(i) => {
            cursor += i + 1;
            true
        }
        None => {
            cursor = bytes.len();
            false
        }
    };

    Ok(ScannedTag {
        tag: Tag {
            name,
            attrs,
            kind,
            position: Position::new(offset, cursor),
            terminated,
        },
        warnings,
    })
}

/// Scan one `key`, `key=value`, or `key="value"` at `start` and record it.
/// Returns the offset just past the attribute.
fn scan_attribute(
    input: &str,
    start: usize,
    attrs: &mut Attributes,
    warnings: &mut Vec<Warning>,
) -> Result<usize> {
    let bytes = input.as_bytes();
    // The key always takes at least the byte at `start`, even if that is `=`.
    let key_end = find_next(bytes, start + 1, |b| {
        is_whitespace(b) || is_tag_end(b) || b == b'='
    });
    let key = &input[start..key_end];
    if attrs.contains_key(key) {
        warnings.push(Warning::new(
            WarningKind::DuplicateAttribute {
                key: key.to_string(),
            },
            Position::new(start, key_end),
        ));
    }

    let mut cursor = key_end;
    let value = if bytes.get(cursor) == Some(&b'=') {
        cursor += 1;
        match bytes.get(cursor).copied() {
            Some(quote @ (b'"' | b'\'')) => {
                let value_start = cursor + 1;
                let close = memchr::memchr(quote, &bytes[value_start..])
                    .map(|i| value_start + i)
                    .ok_or_else(|| Error::UnterminatedAttributeValue {
                        key: key.to_string(),
                        quote: char::from(quote),
                        offset: cursor,
                    })?;
                cursor = close + 1;
                AttributeValue::Text(input[value_start..close].trim().to_string())
            }
            _ => {
                let value_end = find_next(bytes, cursor, |b| is_whitespace(b) || is_tag_end(b));
                let value = input[cursor..value_end].trim().to_string();
                cursor = value_end;
                AttributeValue::Text(value)
            }
        }
    } else {
        AttributeValue::True
    };

    attrs.insert(
        key.to_string(),
        Attribute {
            value,
            position: Position::new(start, cursor),
        },
    );
    Ok(cursor)
}

fn scan_comment(input: &str, offset: usize) -> Result<ScannedTag> {
    let bytes = input.as_bytes();
    if !bytes[offset + 1..].starts_with(b"!--") {
        return Err(Error::MalformedCommentOpen { offset });
    }

    let body_start = offset + 4;
    let body_end = memchr::memmem::find(&bytes[body_start..], b"-->")
        .map(|i| body_start + i)
        .ok_or(Error::UnterminatedComment { offset })?;

    Ok(ScannedTag {
        tag: Tag {
            name: String::new(),
            attrs: Attributes::new(),
            kind: TagKind::Comment {
                text: input[body_start..body_end].trim().to_string(),
            },
            position: Position::new(offset, body_end + 3),
            terminated: true,
        },
        warnings: Vec::new(),
    })
}
