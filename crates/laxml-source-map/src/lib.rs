//! Source locations for laxml.
//!
//! Parsers in this workspace report byte offsets. This crate turns those
//! offsets into something a person can read: row/column locations, whole
//! source lines, and a registry of the documents the offsets point into.
//!
//! # Overview
//!
//! - [`SourceInfo`]: a byte span inside one registered file
//! - [`FileInformation`]: a line-break index for offset to row/column lookups
//! - [`SourceContext`]: the files a set of diagnostics refers to
//!
//! # Example
//!
//! ```rust
//! use laxml_source_map::*;
//!
//! let mut ctx = SourceContext::new();
//! let file_id = ctx.add_file("page.html", "<p>\n  hi\n</p>");
//!
//! let info = SourceInfo::original(file_id, 6, 8);
//! let range = ctx.resolve(&info).unwrap();
//! assert_eq!(range.start.row, 1);
//! assert_eq!(range.start.column, 2);
//! assert_eq!(range.end.display_label(), "2:5");
//! ```

pub mod context;
pub mod file_info;
pub mod source_info;
pub mod types;

pub use context::{SourceContext, SourceFile};
pub use file_info::FileInformation;
pub use source_info::SourceInfo;
pub use types::{FileId, Location, Range};
