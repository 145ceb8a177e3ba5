//! laxml CLI - Main entry point

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod input;

#[derive(Parser)]
#[command(name = "laxml")]
#[command(version)]
#[command(about = "Parse loosely written XML and HTML", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a document and print its tree as JSON
    Parse {
        /// Input file ('-' for stdin)
        file: String,

        /// Fail on mismatched or unmatched close tags
        #[arg(long)]
        strict: bool,

        /// Print JSON on a single line
        #[arg(long)]
        compact: bool,
    },

    /// Report warnings and faults for a document
    Check {
        /// Input file ('-' for stdin)
        file: String,

        /// Fail on mismatched or unmatched close tags
        #[arg(long)]
        strict: bool,

        /// Print diagnostics as a JSON array
        #[arg(long)]
        json: bool,

        /// Exit with an error if any warning is reported
        #[arg(long)]
        deny_warnings: bool,
    },

    /// Count the nodes, attributes and nesting depth of a document
    Stats {
        /// Input file ('-' for stdin)
        file: String,

        /// Fail on mismatched or unmatched close tags
        #[arg(long)]
        strict: bool,
    },

    /// Describe an error code such as L-2-2
    Explain {
        /// The error code
        code: String,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "laxml=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Parse {
            file,
            strict,
            compact,
        } => commands::parse::execute(commands::parse::ParseArgs {
            file,
            strict,
            compact,
        }),
        Commands::Check {
            file,
            strict,
            json,
            deny_warnings,
        } => commands::check::execute(commands::check::CheckArgs {
            file,
            strict,
            json,
            deny_warnings,
        }),
        Commands::Stats { file, strict } => {
            commands::stats::execute(commands::stats::StatsArgs { file, strict })
        }
        Commands::Explain { code } => commands::explain::execute(&code),
    }
}
