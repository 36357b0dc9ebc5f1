//! Entry Risk Checker Binary
//!
//! # Usage
//!
//! ```bash
//! # Size a trade described by a TradeInput JSON document
//! entry-risk-checker size trade.json
//!
//! # Report on a journal snapshot (JSON array of trade records)
//! entry-risk-checker --config config.yaml analyze history.json
//! ```
//!
//! Results are printed to stdout as pretty JSON; logs go to stderr.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Log filter (overrides `observability.logging.level`)

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use entry_risk_checker::{commands, config};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path (defaults to config.yaml when present)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Size a trade and classify the entry
    Size {
        /// TradeInput JSON document
        input: PathBuf,
    },
    /// Summarise a trade history snapshot
    Analyze {
        /// JSON array of trade records
        history: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = commands::start(args.config.as_deref()).context("Failed to start")?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        config = args.config.as_deref().unwrap_or(config::DEFAULT_CONFIG_PATH),
        "Starting entry risk checker"
    );

    let output = match &args.command {
        Command::Size { input } => {
            let result = commands::size_file(&config, input)
                .with_context(|| format!("Failed to size trade from {}", input.display()))?;
            serde_json::to_string_pretty(&result)?
        }
        Command::Analyze { history } => {
            let report = commands::analyze_file(&config, history)
                .with_context(|| format!("Failed to analyze {}", history.display()))?;
            serde_json::to_string_pretty(&report)?
        }
    };

    println!("{output}");
    Ok(())
}
