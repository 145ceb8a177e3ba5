//! Faults and warnings produced while scanning and building the tree.

use crate::types::Position;
use laxml_error_reporting::{DiagnosticMessage, DiagnosticMessageBuilder};
use laxml_source_map::{FileId, FileInformation, SourceInfo};
use serde::Serialize;
use std::fmt;

/// Result type alias for laxml operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Result type for parse operations that return diagnostics.
pub type ParseResult<T> = std::result::Result<T, Vec<DiagnosticMessage>>;

/// A fault that aborts the parse. Every variant carries the byte offset
/// where scanning stopped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("expected `<` at byte {offset}")]
    ExpectedTagOpen { offset: usize },

    #[error("malformed comment at byte {offset}: `<!` must be followed by `--`")]
    MalformedCommentOpen { offset: usize },

    #[error("unterminated comment at byte {offset}: no closing `-->`")]
    UnterminatedComment { offset: usize },

    #[error("unterminated value for attribute `{key}` at byte {offset}: no closing {quote}")]
    UnterminatedAttributeValue {
        key: String,
        quote: char,
        /// Offset of the opening quote.
        offset: usize,
    },

    /// Strict mode only: a close tag that does not match the innermost element.
    #[error("mismatched close tag `</{found}>` at byte {offset}: expected `</{expected}>`")]
    MismatchedCloseTag {
        expected: String,
        found: String,
        offset: usize,
    },

    /// Strict mode only: a close tag with nothing open.
    #[error("close tag `</{name}>` at byte {offset} has no open element")]
    UnmatchedCloseTag { name: String, offset: usize },
}

impl Error {
    pub fn offset(&self) -> usize {
        match self {
            Error::ExpectedTagOpen { offset }
            | Error::MalformedCommentOpen { offset }
            | Error::UnterminatedComment { offset }
            | Error::UnterminatedAttributeValue { offset, .. }
            | Error::MismatchedCloseTag { offset, .. }
            | Error::UnmatchedCloseTag { offset, .. } => *offset,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Error::ExpectedTagOpen { .. } => "L-1-1",
            Error::MalformedCommentOpen { .. } => "L-1-2",
            Error::UnterminatedComment { .. } => "L-1-3",
            Error::UnterminatedAttributeValue { .. } => "L-1-4",
            Error::MismatchedCloseTag { .. } => "L-1-5",
            Error::UnmatchedCloseTag { .. } => "L-1-6",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Error::ExpectedTagOpen { .. } => "Expected Tag Open",
            Error::MalformedCommentOpen { .. } => "Malformed Comment Open",
            Error::UnterminatedComment { .. } => "Unterminated Comment",
            Error::UnterminatedAttributeValue { .. } => "Unterminated Attribute Value",
            Error::MismatchedCloseTag { .. } => "Mismatched Close Tag",
            Error::UnmatchedCloseTag { .. } => "Close Tag Without Open Element",
        }
    }

    /// A short excerpt of `source` around the fault: a `line:column` label,
    /// the offending line, and a caret under the fault column.
    ///
    /// Lines and columns are 1-based; columns count characters.
    pub fn excerpt(&self, source: &str) -> String {
        let offset = clamp_to_boundary(source, self.offset());
        let info = FileInformation::new(source);
        let Some(location) = info.offset_to_location(offset) else {
            return String::new();
        };
        let (line_start, line_end) = info.line_span(location.row).unwrap_or((0, source.len()));
        let line = source.get(line_start..line_end).unwrap_or_default();
        let line = line.strip_suffix('\r').unwrap_or(line);
        let before = source.get(line_start..offset).unwrap_or_default();

        // Tabs stay tabs so the caret lines up with the echoed line.
        let gutter: String = before
            .chars()
            .map(|c| if c == '\t' { '\t' } else { ' ' })
            .collect();
        format!(
            "{}:{}\n{}\n{}^",
            location.row + 1,
            before.chars().count() + 1,
            line,
            gutter
        )
    }

    /// Convert to a structured diagnostic pointing at the fault offset.
    pub fn to_diagnostic(&self, file_id: FileId) -> DiagnosticMessage {
        let offset = self.offset();
        let location = SourceInfo::original(file_id, offset, offset + 1);
        let builder = DiagnosticMessageBuilder::error(self.title())
            .with_code(self.code())
            .with_location(location);

        let builder = match self {
            Error::ExpectedTagOpen { .. } => builder
                .problem("Scanning a tag must start at a `<`")
                .add_detail(format!("byte {offset} is not `<`")),
            Error::MalformedCommentOpen { .. } => builder
                .problem("A comment must open with `<!--`")
                .add_hint("Write `<!--` to start a comment?"),
            Error::UnterminatedComment { .. } => builder
                .problem("This comment never ends")
                .add_detail("no `-->` follows the comment opener")
                .add_hint("Add `-->` after the comment text?"),
            Error::UnterminatedAttributeValue { key, quote, .. } => builder
                .problem(format!("The value of attribute `{key}` has no closing quote"))
                .add_detail(format!("the {quote} opened here is never closed"))
                .add_hint(format!("Add the missing {quote}?")),
            Error::MismatchedCloseTag {
                expected, found, ..
            } => builder
                .problem(format!("Found `</{found}>` while `<{expected}>` is still open"))
                .add_hint(format!("Close `<{expected}>` first, or remove `</{found}>`?")),
            Error::UnmatchedCloseTag { name, .. } => builder
                .problem(format!("`</{name}>` does not close any element"))
                .add_hint(format!("Remove `</{name}>`?")),
        };
        builder.build()
    }
}

fn clamp_to_boundary(source: &str, offset: usize) -> usize {
    let mut offset = offset.min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// What a recoverable problem was about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum WarningKind {
    /// An attribute key seen twice in one tag. The later value wins.
    DuplicateAttribute { key: String },
    /// An element that was still open when an outer close tag or the end
    /// of input closed it.
    UnclosedTag { name: String },
    /// A close tag with no matching open element. It is ignored.
    UnmatchedTag { name: String },
    /// A tag cut off by the end of input before its `>`.
    UnterminatedTag { name: String },
}

/// A recoverable problem. Parsing continues after a warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    #[serde(flatten)]
    pub kind: WarningKind,
    pub position: Position,
}

impl Warning {
    pub fn new(kind: WarningKind, position: Position) -> Self {
        Self { kind, position }
    }

    pub fn offset(&self) -> usize {
        self.position.start
    }

    pub fn message(&self) -> String {
        match &self.kind {
            WarningKind::DuplicateAttribute { key } => format!("Duplicate key: {key}"),
            WarningKind::UnclosedTag { name } => format!("Unclosed tag: {name}"),
            WarningKind::UnmatchedTag { name } => format!("Unmatched tag: {name}"),
            WarningKind::UnterminatedTag { name } => format!("Unterminated tag: {name}"),
        }
    }

    pub fn code(&self) -> &'static str {
        match self.kind {
            WarningKind::DuplicateAttribute { .. } => "L-2-1",
            WarningKind::UnclosedTag { .. } => "L-2-2",
            WarningKind::UnmatchedTag { .. } => "L-2-3",
            WarningKind::UnterminatedTag { .. } => "L-2-4",
        }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            WarningKind::DuplicateAttribute { .. } => "Duplicate Attribute",
            WarningKind::UnclosedTag { .. } => "Unclosed Tag",
            WarningKind::UnmatchedTag { .. } => "Unmatched Tag",
            WarningKind::UnterminatedTag { .. } => "Unterminated Tag",
        }
    }

    pub fn to_diagnostic(&self, file_id: FileId) -> DiagnosticMessage {
        let builder = DiagnosticMessageBuilder::warning(self.title())
            .with_code(self.code())
            .problem(self.message())
            .with_location(self.position.to_source_info(file_id));

        let builder = match &self.kind {
            WarningKind::DuplicateAttribute { key } => builder
                .add_info(format!("the last `{key}` value is kept"))
                .add_hint(format!("Remove one of the `{key}` attributes?")),
            WarningKind::UnclosedTag { name } => builder
                .add_info(format!("`<{name}>` was closed implicitly"))
                .add_hint(format!("Add a matching `</{name}>`?")),
            WarningKind::UnmatchedTag { name } => builder
                .add_info("the close tag was ignored")
                .add_hint(format!("Remove `</{name}>` or add the missing `<{name}>`?")),
            WarningKind::UnterminatedTag { .. } => builder.add_hint("Add the missing `>`?"),
        };
        builder.build()
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at byte {}", self.message(), self.offset())
    }
}
