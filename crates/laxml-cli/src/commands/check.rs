//! `laxml check`: report diagnostics without printing the tree.

use anyhow::{Context, Result};
use laxml::{ParseContext, parse_with_context};
use laxml_error_reporting::DiagnosticMessage;
use std::io::IsTerminal;
use tracing::debug;

use super::{diagnostic_json, render_diagnostics};
use crate::input::Input;

#[derive(Debug)]
pub struct CheckArgs {
    pub file: String,
    pub strict: bool,
    pub json: bool,
    pub deny_warnings: bool,
}

/// Tally of a checked document.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub errors: usize,
    pub warnings: usize,
}

impl Summary {
    pub fn of(diagnostics: &[DiagnosticMessage]) -> Self {
        let errors = diagnostics.iter().filter(|d| d.is_error()).count();
        Self {
            errors,
            warnings: diagnostics.len() - errors,
        }
    }

    pub fn passes(&self, deny_warnings: bool) -> bool {
        self.errors == 0 && (!deny_warnings || self.warnings == 0)
    }

    fn describe(&self) -> String {
        format!(
            "{} error{}, {} warning{}",
            self.errors,
            plural(self.errors),
            self.warnings,
            plural(self.warnings)
        )
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

pub fn execute(args: CheckArgs) -> Result<()> {
    let input = Input::read(&args.file)?;
    let mut ctx = ParseContext::new();
    let result = parse_with_context(input.content(), &input.options(args.strict), &mut ctx);
    if let Err(errors) = result {
        debug!(faults = errors.len(), "document did not parse");
    }
    let diagnostics = ctx.take_diagnostics();
    let summary = Summary::of(&diagnostics);

    if args.json {
        let values: Vec<serde_json::Value> = diagnostics
            .iter()
            .map(|diagnostic| diagnostic_json(diagnostic, &input.sources))
            .collect();
        let json =
            serde_json::to_string_pretty(&values).context("Failed to serialize diagnostics")?;
        println!("{json}");
    } else {
        let color = std::io::stdout().is_terminal();
        print!("{}", render_diagnostics(&diagnostics, &input.sources, color));
        println!("{}: {}", input.path(), summary.describe());
    }

    if !summary.passes(args.deny_warnings) {
        anyhow::bail!("{} did not pass: {}", input.path(), summary.describe());
    }
    Ok(())
}
