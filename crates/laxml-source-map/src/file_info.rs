//! Efficient file information for location lookups

use crate::types::Location;
use serde::{Deserialize, Serialize};

/// Line-break index over a file's content
///
/// Stores the byte offset of every `\n` so that offset to (row, column)
/// conversion is a binary search instead of a rescan of the content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInformation {
    /// Byte offsets of each newline character in the file
    line_breaks: Vec<usize>,

    /// Total length of the file in bytes
    total_length: usize,
}

impl FileInformation {
    /// Create file information by analyzing content
    ///
    /// # Example
    ///
    /// ```
    /// use laxml_source_map::FileInformation;
    ///
    /// let info = FileInformation::new("line 1\nline 2\nline 3");
    /// assert_eq!(info.line_count(), 3);
    /// ```
    pub fn new(content: &str) -> Self {
        let line_breaks: Vec<usize> = newline_offsets(content);

        FileInformation {
            line_breaks,
            total_length: content.len(),
        }
    }

    /// Convert a byte offset to a Location with row and column
    ///
    /// Returns None if the offset is out of bounds.
    ///
    /// # Example
    ///
    /// ```
    /// use laxml_source_map::FileInformation;
    ///
    /// let info = FileInformation::new("hello\nworld");
    /// let loc = info.offset_to_location(6).unwrap();
    /// assert_eq!(loc.row, 1);
    /// assert_eq!(loc.column, 0);
    /// ```
    pub fn offset_to_location(&self, offset: usize) -> Option<Location> {
        if offset > self.total_length {
            return None;
        }

        // A newline belongs to the line it terminates, so an exact hit keeps
        // the same row index as the insertion point.
        let row = match self.line_breaks.binary_search(&offset) {
            Ok(idx) | Err(idx) => idx,
        };

        let line_start = self.line_start(row);

        Some(Location {
            offset,
            row,
            column: offset - line_start,
        })
    }

    /// Byte span `[start, end)` of a row, excluding its terminating newline.
    pub fn line_span(&self, row: usize) -> Option<(usize, usize)> {
        if row >= self.line_count() {
            return None;
        }
        let start = self.line_start(row);
        let end = self
            .line_breaks
            .get(row)
            .copied()
            .unwrap_or(self.total_length);
        Some((start, end))
    }

    /// Get the total length of the file in bytes
    pub fn total_length(&self) -> usize {
        self.total_length
    }

    /// Get the number of lines in the file
    pub fn line_count(&self) -> usize {
        self.line_breaks.len() + 1
    }

    fn line_start(&self, row: usize) -> usize {
        if row == 0 {
            0
        } else {
            self.line_breaks[row - 1] + 1
        }
    }
}

fn newline_offsets(content: &str) -> Vec<usize> {
    content
        .bytes()
        .enumerate()
        .filter_map(|(idx, byte)| (byte == b'\n').then_some(idx))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file() {
        let info = FileInformation::new("");
        assert_eq!(info.total_length(), 0);
        assert_eq!(info.line_count(), 1);

        let loc = info.offset_to_location(0).unwrap();
        assert_eq!(loc.row, 0);
        assert_eq!(loc.column, 0);
        assert_eq!(info.line_span(0), Some((0, 0)));
    }

    #[test]
    fn test_multiple_lines() {
        let content = "line 1\nline 2\nline 3";
        let info = FileInformation::new(content);
        assert_eq!(info.line_count(), 3);

        // At first newline (offset 6 is '\n')
        let loc = info.offset_to_location(6).unwrap();
        assert_eq!(loc.row, 0);
        assert_eq!(loc.column, 6);

        // Start of second line
        let loc = info.offset_to_location(7).unwrap();
        assert_eq!(loc.row, 1);
        assert_eq!(loc.column, 0);

        // End of file
        let loc = info.offset_to_location(20).unwrap();
        assert_eq!(loc.row, 2);
        assert_eq!(loc.column, 6);
    }

    #[test]
    fn test_line_span() {
        let content = "ab\ncde\n\nf";
        let info = FileInformation::new(content);
        assert_eq!(info.line_span(0), Some((0, 2)));
        assert_eq!(info.line_span(1), Some((3, 6)));
        assert_eq!(info.line_span(2), Some((7, 7)));
        assert_eq!(info.line_span(3), Some((8, 9)));
        assert_eq!(info.line_span(4), None);
        assert_eq!(&content[3..6], "cde");
    }

    #[test]
    fn test_out_of_bounds() {
        let info = FileInformation::new("hello");
        assert!(info.offset_to_location(100).is_none());
    }

    #[test]
    fn test_unicode_content_uses_byte_offsets() {
        // "café" is 5 bytes, so the second line starts at byte 6
        let info = FileInformation::new("café\nwörld");
        let loc = info.offset_to_location(6).unwrap();
        assert_eq!(loc.row, 1);
        assert_eq!(loc.column, 0);
    }

    #[test]
    fn test_file_ending_with_newline() {
        let info = FileInformation::new("line 1\nline 2\n");
        assert_eq!(info.line_count(), 3);

        let loc = info.offset_to_location(14).unwrap();
        assert_eq!(loc.row, 2);
        assert_eq!(loc.column, 0);
    }
}
