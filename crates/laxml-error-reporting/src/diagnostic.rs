//! Core diagnostic message types.
//!
//! This module defines the structures for representing diagnostic messages
//! (errors, warnings, info) following tidyverse-style guidelines.

use laxml_source_map::{SourceContext, SourceFile, SourceInfo};
use serde::{Deserialize, Serialize};

/// The kind of diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// An error that prevents completion
    Error,
    /// A warning that doesn't prevent completion but indicates a problem
    Warning,
    /// Informational message
    Info,
    /// A note providing additional context
    Note,
}

impl DiagnosticKind {
    fn label(self) -> &'static str {
        match self {
            DiagnosticKind::Error => "Error",
            DiagnosticKind::Warning => "Warning",
            DiagnosticKind::Info => "Info",
            DiagnosticKind::Note => "Note",
        }
    }
}

/// How detail items should be presented (tidyverse x/i bullet style).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetailKind {
    /// Error detail (✖ bullet in tidyverse style)
    Error,
    /// Info detail (i bullet in tidyverse style)
    Info,
    /// Note detail (plain bullet)
    Note,
}

impl DetailKind {
    fn bullet(self) -> &'static str {
        match self {
            DetailKind::Error => "✖",
            DetailKind::Info => "ℹ",
            DetailKind::Note => "•",
        }
    }

    fn json_name(self) -> &'static str {
        match self {
            DetailKind::Error => "error",
            DetailKind::Info => "info",
            DetailKind::Note => "note",
        }
    }
}

/// The content of a message or detail item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageContent {
    /// Plain text content
    Plain(String),
    /// Markdown content (backticks mark source fragments)
    Markdown(String),
}

impl MessageContent {
    /// Get the raw string content for display
    pub fn as_str(&self) -> &str {
        match self {
            MessageContent::Plain(s) => s,
            MessageContent::Markdown(s) => s,
        }
    }

    /// Convert to JSON value with type information
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::json;
        match self {
            MessageContent::Plain(s) => json!({
                "type": "plain",
                "content": s
            }),
            MessageContent::Markdown(s) => json!({
                "type": "markdown",
                "content": s
            }),
        }
    }
}

impl From<String> for MessageContent {
    fn from(s: String) -> Self {
        MessageContent::Markdown(s)
    }
}

impl From<&str> for MessageContent {
    fn from(s: &str) -> Self {
        MessageContent::Markdown(s.to_string())
    }
}

/// A detail item in a diagnostic message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailItem {
    /// The kind of detail (error, info, note)
    pub kind: DetailKind,
    /// The content of the detail
    pub content: MessageContent,
    /// Optional source location this detail points at
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceInfo>,
}

/// A diagnostic message following tidyverse-style structure.
///
/// Structure:
/// 1. **Code**: Optional error code (e.g., "L-2-2") for searchability
/// 2. **Title**: Brief error message
/// 3. **Kind**: Error, Warning, Info
/// 4. **Problem**: What went wrong
/// 5. **Details**: Specific information (bulleted)
/// 6. **Hints**: Optional guidance for fixing (ends with ?)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticMessage {
    /// Optional error code (e.g., "L-2-2")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Brief title for the error
    pub title: String,

    /// The kind of diagnostic (Error, Warning, Info)
    pub kind: DiagnosticKind,

    /// The problem statement
    pub problem: Option<MessageContent>,

    /// Specific error details
    pub details: Vec<DetailItem>,

    /// Optional hints for fixing (ends with ?)
    pub hints: Vec<MessageContent>,

    /// Source location for this diagnostic
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceInfo>,
}

impl DiagnosticMessage {
    /// Create a new diagnostic message with just a title and kind.
    ///
    /// Note: Consider using [`crate::DiagnosticMessageBuilder`] instead for better structure.
    pub fn new(kind: DiagnosticKind, title: impl Into<String>) -> Self {
        Self {
            code: None,
            title: title.into(),
            kind,
            problem: None,
            details: Vec::new(),
            hints: Vec::new(),
            location: None,
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

    /// Set the error code.
    ///
    /// ```
    /// use laxml_error_reporting::DiagnosticMessage;
    ///
    /// let msg = DiagnosticMessage::error("Unterminated Comment").with_code("L-1-3");
    /// assert_eq!(msg.code.as_deref(), Some("L-1-3"));
    /// ```
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.kind == DiagnosticKind::Error
    }

    /// Catalog entry for this message's code, if any.
    pub fn code_info(&self) -> Option<&'static crate::ErrorCodeInfo> {
        self.code
            .as_deref()
            .and_then(crate::catalog::get_error_info)
    }

    /// Render this diagnostic message as plain text.
    ///
    /// With a source context and a location, the output starts with an
    /// ariadne snippet of the offending source; otherwise a tidyverse-style
    /// block is produced:
    ///
    /// ```text
    /// Error [L-1-4]: title
    /// Problem statement here
    /// ✖ Error detail
    /// ℹ Info detail
    /// ? Hint
    /// ```
    ///
    /// # Example
    ///
    /// ```
    /// use laxml_error_reporting::DiagnosticMessageBuilder;
    ///
    /// let msg = DiagnosticMessageBuilder::error("Invalid input")
    ///     .problem("Values must be quoted")
    ///     .add_detail("Found a bare `<` in an attribute")
    ///     .add_hint("Quote the value?")
    ///     .build();
    /// let text = msg.to_text(None);
    /// assert!(text.contains("Error: Invalid input"));
    /// assert!(text.contains("Values must be quoted"));
    /// ```
    pub fn to_text(&self, ctx: Option<&SourceContext>) -> String {
        self.render(ctx, false)
    }

    /// Same as [`DiagnosticMessage::to_text`] with ANSI colours in the source snippet.
    pub fn to_ansi_text(&self, ctx: Option<&SourceContext>) -> String {
        self.render(ctx, true)
    }

    fn render(&self, ctx: Option<&SourceContext>, color: bool) -> String {
        let mut result = String::new();

        // Main location if available, otherwise the first located detail
        let location = self
            .location
            .as_ref()
            .or_else(|| self.details.iter().find_map(|d| d.location.as_ref()));

        let snippet = match (location, ctx) {
            (Some(loc), Some(ctx)) => self.render_ariadne_source_context(loc, ctx, color),
            _ => None,
        };

        match snippet {
            Some(snippet) => {
                // ariadne already shows title, code, problem and located details
                result.push_str(&snippet);
                for detail in self.details.iter().filter(|d| d.location.is_none()) {
                    push_line(
                        &mut result,
                        &format!("{} {}", detail.kind.bullet(), detail.content.as_str()),
                    );
                }
            }
            None => {
                let header = match &self.code {
                    Some(code) => format!("{} [{}]: {}", self.kind.label(), code, self.title),
                    None => format!("{}: {}", self.kind.label(), self.title),
                };
                push_line(&mut result, &header);

                if let Some(loc) = location {
                    push_line(
                        &mut result,
                        &format!("at bytes {}..{}", loc.start_offset(), loc.end_offset()),
                    );
                }

                if let Some(problem) = &self.problem {
                    push_line(&mut result, problem.as_str());
                }

                for detail in &self.details {
                    push_line(
                        &mut result,
                        &format!("{} {}", detail.kind.bullet(), detail.content.as_str()),
                    );
                }
            }
        }

        for hint in &self.hints {
            push_line(&mut result, &format!("? {}", hint.as_str()));
        }

        result
    }

    /// Render this diagnostic message as a JSON value.
    ///
    /// ```
    /// use laxml_error_reporting::DiagnosticMessage;
    ///
    /// let msg = DiagnosticMessage::warning("Unmatched Tag");
    /// let json = msg.to_json();
    /// assert_eq!(json["kind"], "warning");
    /// assert_eq!(json["title"], "Unmatched Tag");
    /// ```
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::json;

        let kind_str = match self.kind {
            DiagnosticKind::Error => "error",
            DiagnosticKind::Warning => "warning",
            DiagnosticKind::Info => "info",
            DiagnosticKind::Note => "note",
        };

        let mut obj = json!({
            "kind": kind_str,
            "title": self.title,
        });

        if let Some(code) = &self.code {
            obj["code"] = json!(code);
        }

        if let Some(problem) = &self.problem {
            obj["problem"] = problem.to_json();
        }

        if !self.details.is_empty() {
            let details: Vec<_> = self
                .details
                .iter()
                .map(|d| {
                    let mut detail_obj = json!({
                        "kind": d.kind.json_name(),
                        "content": d.content.to_json()
                    });
                    if let Some(location) = &d.location {
                        detail_obj["location"] = json!(location);
                    }
                    detail_obj
                })
                .collect();
            obj["details"] = json!(details);
        }

        if !self.hints.is_empty() {
            let hints: Vec<_> = self.hints.iter().map(MessageContent::to_json).collect();
            obj["hints"] = json!(hints);
        }

        if let Some(location) = &self.location {
            obj["location"] = json!(location);
        }

        obj
    }

    /// Render source context using ariadne.
    ///
    /// Returns `None` when the file is unknown or empty, leaving the caller
    /// to fall back to the plain rendering.
    fn render_ariadne_source_context(
        &self,
        main_location: &SourceInfo,
        ctx: &SourceContext,
        color: bool,
    ) -> Option<String> {
        use ariadne::{Color, Config, Label, Report, ReportKind, Source};

        let file = ctx.get_file(main_location.file_id)?;
        if file.content.is_empty() {
            return None;
        }

        let (report_kind, main_color) = match self.kind {
            DiagnosticKind::Error => (ReportKind::Error, Color::Red),
            DiagnosticKind::Warning => (ReportKind::Warning, Color::Yellow),
            DiagnosticKind::Info => (ReportKind::Advice, Color::Cyan),
            DiagnosticKind::Note => (ReportKind::Advice, Color::Blue),
        };

        let main_span = char_span(file, main_location);

        let mut report = Report::build(report_kind, file.path.clone(), main_span.start)
            .with_config(Config::default().with_color(color));

        if let Some(code) = &self.code {
            report = report.with_message(format!("[{}] {}", code, self.title));
        } else {
            report = report.with_message(&self.title);
        }

        let main_message = match &self.problem {
            Some(problem) => problem.as_str(),
            None => &self.title,
        };

        report = report.with_label(
            Label::new((file.path.clone(), main_span))
                .with_message(main_message)
                .with_color(main_color),
        );

        for detail in &self.details {
            let Some(detail_loc) = &detail.location else {
                continue;
            };
            if detail_loc.file_id != main_location.file_id {
                continue;
            }
            let detail_color = match detail.kind {
                DetailKind::Error => Color::Red,
                DetailKind::Info => Color::Cyan,
                DetailKind::Note => Color::Blue,
            };
            report = report.with_label(
                Label::new((file.path.clone(), char_span(file, detail_loc)))
                    .with_message(detail.content.as_str())
                    .with_color(detail_color),
            );
        }

        let mut output = Vec::new();
        report
            .finish()
            .write(
                (file.path.clone(), Source::from(file.content.clone())),
                &mut output,
            )
            .ok()?;

        String::from_utf8(output).ok()
    }
}

/// ariadne counts characters, not bytes; empty spans are widened to one
/// character so the label stays visible.
fn char_span(file: &SourceFile, info: &SourceInfo) -> std::ops::Range<usize> {
    let to_char = |byte: usize| {
        file.content
            .char_indices()
            .take_while(|(idx, _)| *idx < byte)
            .count()
    };
    let total = file.content.chars().count();
    let start = to_char(info.start_offset()).min(total.saturating_sub(1));
    let end = to_char(info.end_offset()).clamp(start + 1, total.max(start + 1));
    start..end
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DiagnosticMessageBuilder;
    use laxml_source_map::FileId;

    #[test]
    fn test_diagnostic_message_new() {
        let msg = DiagnosticMessage::new(DiagnosticKind::Error, "Test error");
        assert_eq!(msg.title, "Test error");
        assert_eq!(msg.kind, DiagnosticKind::Error);
        assert!(msg.code.is_none());
        assert!(msg.problem.is_none());
        assert!(msg.details.is_empty());
        assert!(msg.hints.is_empty());
        assert!(msg.is_error());
    }

    #[test]
    fn test_message_content_from_str() {
        let content: MessageContent = "test".into();
        assert_eq!(content.as_str(), "test");
        assert!(matches!(content, MessageContent::Markdown(_)));
    }

    #[test]
    fn test_to_text_simple_error() {
        let msg = DiagnosticMessage::error("Something went wrong");
        assert_eq!(msg.to_text(None), "Error: Something went wrong\n");
    }

    #[test]
    fn test_to_text_with_code() {
        let msg = DiagnosticMessage::warning("Unclosed Tag").with_code("L-2-2");
        assert_eq!(msg.to_text(None), "Warning [L-2-2]: Unclosed Tag\n");
    }

    #[test]
    fn test_to_text_full_message() {
        let msg = DiagnosticMessageBuilder::error("Invalid input")
            .problem("Values must be quoted")
            .add_detail("Found a bare value")
            .add_info("Quotes may be single or double")
            .add_hint("Quote the value?")
            .build();

        assert_eq!(
            msg.to_text(None),
            "Error: Invalid input\n\
             Values must be quoted\n\
             ✖ Found a bare value\n\
             ℹ Quotes may be single or double\n\
             ? Quote the value?\n"
        );
    }

    #[test]
    fn test_to_text_location_without_context() {
        let msg = DiagnosticMessageBuilder::warning("Unmatched Tag")
            .with_location(SourceInfo::original(FileId(0), 4, 8))
            .build();
        let text = msg.to_text(None);
        assert!(text.contains("at bytes 4..8"));
    }

    #[test]
    fn test_to_text_with_context_uses_ariadne() {
        let mut ctx = SourceContext::new();
        let file_id = ctx.add_file("page.xml", "<a>\n<b x='1' x='2'/>\n</a>");

        let msg = DiagnosticMessageBuilder::warning("Duplicate Attribute")
            .with_code("L-2-1")
            .problem("Duplicate key: x")
            .with_location(SourceInfo::original(file_id, 13, 14))
            .add_hint("Remove one of the attributes?")
            .build();

        let text = msg.to_text(Some(&ctx));
        assert!(text.contains("[L-2-1] Duplicate Attribute"));
        assert!(text.contains("page.xml"));
        assert!(text.contains("2:10"));
        assert!(text.contains("Duplicate key: x"));
        assert!(text.ends_with("? Remove one of the attributes?\n"));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn test_to_text_with_unknown_file_falls_back() {
        let ctx = SourceContext::new();
        let msg = DiagnosticMessageBuilder::error("Unterminated Comment")
            .with_location(SourceInfo::original(FileId(3), 0, 4))
            .build();
        assert!(msg.to_text(Some(&ctx)).starts_with("Error: Unterminated Comment\n"));
    }

    #[test]
    fn test_to_json_full_message() {
        let msg = DiagnosticMessageBuilder::error("Invalid input")
            .with_code("L-1-4")
            .problem("Values must be quoted")
            .add_detail("Found a bare value")
            .add_hint("Quote the value?")
            .with_location(SourceInfo::original(FileId(0), 3, 9))
            .build();

        let json = msg.to_json();
        assert_eq!(json["kind"], "error");
        assert_eq!(json["code"], "L-1-4");
        assert_eq!(json["problem"]["type"], "markdown");
        assert_eq!(json["problem"]["content"], "Values must be quoted");
        assert_eq!(json["details"][0]["kind"], "error");
        assert_eq!(json["details"][0]["content"]["content"], "Found a bare value");
        assert_eq!(json["hints"][0]["content"], "Quote the value?");
        assert_eq!(json["location"]["start"], 3);
        assert_eq!(json["location"]["end"], 9);
    }

    #[test]
    fn test_location_optional_in_to_json() {
        let json = DiagnosticMessage::error("No location").to_json();
        assert!(json.get("location").is_none());
        assert!(json.get("code").is_none());
    }

    #[test]
    fn test_code_info_lookup() {
        let msg = DiagnosticMessage::warning("Unclosed Tag").with_code("L-2-2");
        assert_eq!(msg.code_info().map(|i| i.subsystem.as_str()), Some("tree"));
        assert!(DiagnosticMessage::warning("x").code_info().is_none());
    }

    #[test]
    fn test_char_span_counts_characters() {
        let mut ctx = SourceContext::new();
        let id = ctx.add_file("u.xml", "<é a='1'/>");
        let file = ctx.get_file(id).unwrap();
        // 'a' sits at byte 4 but character 3
        let span = char_span(file, &SourceInfo::original(id, 4, 5));
        assert_eq!(span, 3..4);
        // empty spans widen to one character
        let span = char_span(file, &SourceInfo::original(id, 4, 4));
        assert_eq!(span, 3..4);
    }
}
