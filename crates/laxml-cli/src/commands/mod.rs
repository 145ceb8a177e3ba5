//! Command implementations for the laxml CLI.

pub mod check;
pub mod explain;
pub mod parse;
pub mod stats;

use laxml_error_reporting::DiagnosticMessage;
use laxml_source_map::SourceContext;

/// Render diagnostics one after another with source snippets.
pub fn render_diagnostics(
    diagnostics: &[DiagnosticMessage],
    sources: &SourceContext,
    color: bool,
) -> String {
    diagnostics
        .iter()
        .map(|diagnostic| {
            if color {
                diagnostic.to_ansi_text(Some(sources))
            } else {
                diagnostic.to_text(Some(sources))
            }
        })
        .collect()
}

/// JSON form of a diagnostic, with its span resolved to `line:column`
/// labels when the file is known.
pub fn diagnostic_json(
    diagnostic: &DiagnosticMessage,
    sources: &SourceContext,
) -> serde_json::Value {
    let mut value = diagnostic.to_json();
    if let Some(range) = diagnostic
        .location
        .as_ref()
        .and_then(|location| sources.resolve(location))
    {
        value["range"] = serde_json::json!({
            "start": range.start.display_label(),
            "end": range.end.display_label(),
        });
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use laxml::{ParseContext, ParseOptions, parse_with_context};

    fn diagnostics_for(content: &str) -> (Vec<DiagnosticMessage>, SourceContext) {
        let mut sources = SourceContext::new();
        let file_id = sources.add_file("doc.html", content);
        let mut ctx = ParseContext::new();
        let options = ParseOptions::new().with_file_id(file_id);
        parse_with_context(content, &options, &mut ctx).ok();
        (ctx.take_diagnostics(), sources)
    }

    #[test]
    fn test_diagnostic_json_has_range() {
        let (diagnostics, sources) = diagnostics_for("<p>\n  <b></p>");
        let json = diagnostic_json(&diagnostics[0], &sources);
        assert_eq!(json["code"], "L-2-2");
        assert_eq!(json["range"]["start"], "2:3");
        assert_eq!(json["range"]["end"], "2:6");
    }

    #[test]
    fn test_plain_rendering_has_no_escapes() {
        let (diagnostics, sources) = diagnostics_for("<a></b>");
        let text = render_diagnostics(&diagnostics, &sources, false);
        assert!(!text.contains('\u{1b}'));
        assert!(text.contains("L-2-3"));
    }
}
