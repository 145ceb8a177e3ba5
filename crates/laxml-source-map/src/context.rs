//! Source context for managing files

use crate::file_info::FileInformation;
use crate::source_info::SourceInfo;
use crate::types::{FileId, Location, Range};

/// Registry of the documents that diagnostics point into
#[derive(Debug, Clone, Default)]
pub struct SourceContext {
    files: Vec<SourceFile>,
}

/// A source file with its content and line index
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// File path or a label such as `<stdin>`
    pub path: String,
    pub content: String,
    pub file_info: FileInformation,
}

impl SourceContext {
    pub fn new() -> Self {
        SourceContext { files: Vec::new() }
    }

    /// Add a file to the context and return its ID
    pub fn add_file(&mut self, path: impl Into<String>, content: impl Into<String>) -> FileId {
        let id = FileId(self.files.len());
        let content = content.into();
        let file_info = FileInformation::new(&content);
        self.files.push(SourceFile {
            path: path.into(),
            content,
            file_info,
        });
        id
    }

    pub fn get_file(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Resolve both ends of a span to row/column locations.
    pub fn resolve(&self, info: &SourceInfo) -> Option<Range> {
        let file = self.get_file(info.file_id)?;
        Some(Range {
            start: file.location(info.start)?,
            end: file.location(info.end)?,
        })
    }
}

impl SourceFile {
    pub fn location(&self, offset: usize) -> Option<Location> {
        self.file_info.offset_to_location(offset)
    }

    /// Text of a row without its line terminator (a trailing `\r` is dropped).
    pub fn line_text(&self, row: usize) -> Option<&str> {
        let (start, end) = self.file_info.line_span(row)?;
        let line = self.content.get(start..end)?;
        Some(line.strip_suffix('\r').unwrap_or(line))
    }
}
