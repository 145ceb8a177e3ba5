//! Diagnostic collection across parses.

use laxml_error_reporting::{DiagnosticKind, DiagnosticMessage};

/// Collects diagnostics from one or more parses.
///
/// Warnings are recorded even when the parse succeeds, so a caller can
/// report them after using the tree.
///
/// ```rust
/// use laxml::{parse_with_context, ParseContext, ParseOptions};
///
/// let mut ctx = ParseContext::new();
/// match parse_with_context("<p>open", &ParseOptions::default(), &mut ctx) {
///     Ok(document) => {
///         assert_eq!(document.children().len(), 1);
///         for diag in ctx.diagnostics() {
///             eprintln!("warning: {}", diag.title);
///         }
///     }
///     Err(errors) => {
///         for err in errors {
///             eprintln!("error: {}", err.title);
///         }
///     }
/// }
/// assert_eq!(ctx.warning_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct ParseContext {
    diagnostics: Vec<DiagnosticMessage>,
}

impl ParseContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_diagnostic(&mut self, diagnostic: DiagnosticMessage) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn diagnostics(&self) -> &[DiagnosticMessage] {
        &self.diagnostics
    }

    /// Take all collected diagnostics, leaving the context empty.
    pub fn take_diagnostics(&mut self) -> Vec<DiagnosticMessage> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Check if any errors (not warnings) have been collected.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(DiagnosticMessage::is_error)
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.kind == DiagnosticKind::Warning)
            .count()
    }
}
