//! `laxml stats`: node counts and nesting depth.

use anyhow::Result;
use laxml::{Document, Node, parse_with_options, walk_with_depth};

use crate::input::Input;

#[derive(Debug)]
pub struct StatsArgs {
    pub file: String,
    pub strict: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Stats {
    pub elements: usize,
    pub texts: usize,
    pub comments: usize,
    pub attributes: usize,
    /// Deepest nesting; top-level nodes are at depth 1.
    pub max_depth: usize,
    pub warnings: usize,
}

impl Stats {
    pub fn collect(document: &Document) -> Self {
        let mut stats = Stats {
            warnings: document.warnings.len(),
            ..Stats::default()
        };
        walk_with_depth(&document.root, |node, depth| {
            match node {
                // The root is a container, not an element of the document.
                Node::Element(e) if e.is_root() => return,
                Node::Element(e) => {
                    stats.elements += 1;
                    stats.attributes += e.attrs.len();
                }
                Node::Text(_) => stats.texts += 1,
                Node::Comment(_) => stats.comments += 1,
            }
            stats.max_depth = stats.max_depth.max(depth);
        });
        stats
    }
}

pub fn execute(args: StatsArgs) -> Result<()> {
    let input = Input::read(&args.file)?;
    let document = parse_with_options(input.content(), &input.options(args.strict))
        .map_err(|e| anyhow::anyhow!("{}:{}\n{}", input.path(), e.excerpt(input.content()), e))?;

    let stats = Stats::collect(&document);
    println!("elements:   {}", stats.elements);
    println!("text:       {}", stats.texts);
    println!("comments:   {}", stats.comments);
    println!("attributes: {}", stats.attributes);
    println!("max depth:  {}", stats.max_depth);
    println!("warnings:   {}", stats.warnings);
    Ok(())
}
