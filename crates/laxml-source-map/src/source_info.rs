//! Byte spans tied to a source file

use crate::types::FileId;
use serde::{Deserialize, Serialize};

/// A half-open byte span `[start, end)` inside a registered source file.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceInfo {
    /// The file this span points into
    pub file_id: FileId,
    /// First byte of the span
    pub start: usize,
    /// One past the last byte of the span
    pub end: usize,
}

impl SourceInfo {
    /// Create source info for a span in an original file
    ///
    /// A reversed pair is normalized so that `start <= end` always holds.
    pub fn original(file_id: FileId, start: usize, end: usize) -> Self {
        let (start, end) = if start <= end {
            (start, end)
        } else {
            (end, start)
        };
        SourceInfo {
            file_id,
            start,
            end,
        }
    }

    pub fn start_offset(&self) -> usize {
        self.start
    }

    pub fn end_offset(&self) -> usize {
        self.end
    }

    pub fn length(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `offset` falls inside the span.
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }
}
