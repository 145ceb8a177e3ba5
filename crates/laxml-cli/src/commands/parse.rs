//! `laxml parse`: print the tree as JSON.

use anyhow::{Context, Result};
use laxml::{ParseContext, parse_with_context};
use std::io::IsTerminal;
use tracing::debug;

use super::render_diagnostics;
use crate::input::Input;

#[derive(Debug)]
pub struct ParseArgs {
    pub file: String,
    pub strict: bool,
    pub compact: bool,
}

pub fn execute(args: ParseArgs) -> Result<()> {
    let input = Input::read(&args.file)?;
    let mut ctx = ParseContext::new();
    let result = parse_with_context(input.content(), &input.options(args.strict), &mut ctx);
    let color = std::io::stderr().is_terminal();
    eprint!("{}", render_diagnostics(ctx.diagnostics(), &input.sources, color));

    let Ok(document) = result else {
        anyhow::bail!("Failed to parse {}", input.path());
    };
    debug!(warnings = document.warnings.len(), "parsed {}", input.path());

    let json = if args.compact {
        serde_json::to_string(&document.root)
    } else {
        serde_json::to_string_pretty(&document.root)
    }
    .context("Failed to serialize tree")?;
    println!("{json}");
    Ok(())
}
