//! Error reporting and diagnostic messages for laxml.
//!
//! Parser faults and recoverable warnings are both turned into a
//! [`DiagnosticMessage`]: a tidyverse-style record with a title, a problem
//! statement, bulleted details and hints, an optional error code and an
//! optional source location.
//!
//! - [`DiagnosticMessageBuilder`]: the recommended way to build messages
//! - [`DiagnosticMessage::to_text`]: plain text, with an ariadne source
//!   snippet when a [`laxml_source_map::SourceContext`] is available
//! - [`DiagnosticMessage::to_json`]: machine-readable output
//! - [`catalog`]: stable error codes (`L-<subsystem>-<number>`)
//!
//! # Example
//!
//! ```
//! use laxml_error_reporting::DiagnosticMessageBuilder;
//!
//! let warning = DiagnosticMessageBuilder::warning("Unclosed Tag")
//!     .with_code("L-2-2")
//!     .problem("`<b>` is never closed")
//!     .add_hint("Add a matching `</b>`?")
//!     .build();
//!
//! assert!(warning.to_text(None).contains("Warning [L-2-2]: Unclosed Tag"));
//! ```

pub mod builder;
pub mod catalog;
pub mod diagnostic;

pub use builder::DiagnosticMessageBuilder;
pub use catalog::{ERROR_CATALOG, ErrorCodeInfo, get_error_info, get_subsystem};
pub use diagnostic::{DetailItem, DetailKind, DiagnosticKind, DiagnosticMessage, MessageContent};
