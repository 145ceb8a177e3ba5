//! Builder API for diagnostic messages.

use crate::diagnostic::{DetailItem, DetailKind, DiagnosticKind, DiagnosticMessage, MessageContent};
use laxml_source_map::SourceInfo;

/// Builds a [`DiagnosticMessage`] one tidyverse section at a time.
///
/// ```
/// use laxml_error_reporting::DiagnosticMessageBuilder;
///
/// let error = DiagnosticMessageBuilder::error("Unterminated Attribute Value")
///     .with_code("L-1-4")
///     .problem("The value of `href` has no closing quote")
///     .add_detail("The quote opened here is never closed")
///     .add_hint("Add the missing `\"`?")
///     .build();
///
/// assert_eq!(error.details.len(), 1);
/// assert_eq!(error.hints.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct DiagnosticMessageBuilder {
    message: DiagnosticMessage,
}

impl DiagnosticMessageBuilder {
    pub fn new(kind: DiagnosticKind, title: impl Into<String>) -> Self {
        Self {
            message: DiagnosticMessage::new(kind, title),
        }
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Error, title)
    }

    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Warning, title)
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Info, title)
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.message.code = Some(code.into());
        self
    }

    /// The "what went wrong" statement.
    pub fn problem(mut self, problem: impl Into<MessageContent>) -> Self {
        self.message.problem = Some(problem.into());
        self
    }

    pub fn add_detail(self, content: impl Into<MessageContent>) -> Self {
        self.push_detail(DetailKind::Error, content.into(), None)
    }

    pub fn add_info(self, content: impl Into<MessageContent>) -> Self {
        self.push_detail(DetailKind::Info, content.into(), None)
    }

    pub fn add_note(self, content: impl Into<MessageContent>) -> Self {
        self.push_detail(DetailKind::Note, content.into(), None)
    }

    /// Add an error detail that points at its own source span.
    pub fn add_detail_at(self, content: impl Into<MessageContent>, location: SourceInfo) -> Self {
        self.push_detail(DetailKind::Error, content.into(), Some(location))
    }

    /// Add an info detail that points at its own source span.
    pub fn add_info_at(self, content: impl Into<MessageContent>, location: SourceInfo) -> Self {
        self.push_detail(DetailKind::Info, content.into(), Some(location))
    }

    pub fn add_hint(mut self, hint: impl Into<MessageContent>) -> Self {
        self.message.hints.push(hint.into());
        self
    }

    pub fn with_location(mut self, location: SourceInfo) -> Self {
        self.message.location = Some(location);
        self
    }

    pub fn build(self) -> DiagnosticMessage {
        self.message
    }

    fn push_detail(
        mut self,
        kind: DetailKind,
        content: MessageContent,
        location: Option<SourceInfo>,
    ) -> Self {
        self.message.details.push(DetailItem {
            kind,
            content,
            location,
        });
        self
    }
}
