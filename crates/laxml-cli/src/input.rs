//! Reading documents from files or stdin.

use anyhow::{Context, Result};
use laxml::{CloseTagPolicy, ParseOptions};
use laxml_source_map::{FileId, SourceContext};
use std::io::Read;

/// A document loaded into a [`SourceContext`] for diagnostic rendering.
pub struct Input {
    pub sources: SourceContext,
    pub file_id: FileId,
}

impl Input {
    /// Read `path`, or stdin when `path` is `-`.
    pub fn read(path: &str) -> Result<Self> {
        let content = if path == "-" {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        } else {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?
        };
        Ok(Self::from_string(display_name(path), content))
    }

    pub fn from_string(path: &str, content: String) -> Self {
        let mut sources = SourceContext::new();
        let file_id = sources.add_file(path, content);
        Self { sources, file_id }
    }

    pub fn content(&self) -> &str {
        self.sources
            .get_file(self.file_id)
            .map_or("", |file| file.content.as_str())
    }

    pub fn path(&self) -> &str {
        self.sources
            .get_file(self.file_id)
            .map_or("", |file| file.path.as_str())
    }

    pub fn options(&self, strict: bool) -> ParseOptions {
        let policy = if strict {
            CloseTagPolicy::Strict
        } else {
            CloseTagPolicy::Recover
        };
        ParseOptions::new()
            .with_close_tags(policy)
            .with_file_id(self.file_id)
    }
}

fn display_name(path: &str) -> &str {
    if path == "-" { "<stdin>" } else { path }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_string_registers_file() {
        let input = Input::from_string("page.html", "<p>hi</p>".to_string());
        assert_eq!(input.content(), "<p>hi</p>");
        assert_eq!(input.path(), "page.html");
        assert_eq!(input.sources.len(), 1);
    }

    #[test]
    fn test_options_follow_strict_flag() {
        let input = Input::from_string("x", String::new());
        assert_eq!(input.options(true).close_tags, CloseTagPolicy::Strict);
        assert_eq!(input.options(false).close_tags, CloseTagPolicy::Recover);
        assert_eq!(input.options(false).file_id, input.file_id);
    }

    #[test]
    fn test_stdin_display_name() {
        assert_eq!(display_name("-"), "<stdin>");
        assert_eq!(display_name("a.xml"), "a.xml");
    }
}
