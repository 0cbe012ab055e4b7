//! Command-line interface

use std::path::PathBuf;

use clap::{ArgAction, Parser};

pub mod commands;
pub mod formatters;
pub mod output;

pub use commands::Commands;
pub use output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "entity-search", version, about = "Search and rank review-platform entities")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Machine-readable output: JSON results, JSON logs, JSON errors
    #[arg(long, global = true)]
    pub robot: bool,

    /// Output format (overrides config and --robot)
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a config file (replaces global and project config)
    #[arg(long, global = true, env = "ES_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Output format requested on the command line, if any.
    #[must_use]
    pub fn requested_format(&self) -> Option<OutputFormat> {
        self.format
            .or_else(|| self.robot.then_some(OutputFormat::Json))
    }
}
