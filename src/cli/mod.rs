//! Command-line interface.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;

pub use commands::Commands;

use crate::config::Config;
use output::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "malla",
    version,
    about = "Track progress through a prerequisite-gated curriculum"
)]
pub struct Cli {
    /// Path to a config file (skips config discovery)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Machine-readable JSON output and error envelopes
    #[arg(long, global = true)]
    pub robot: bool,

    /// Output format (overrides --robot and the config default)
    #[arg(long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Resolve the output format: explicit flag, then robot mode, then the
    /// configured default.
    #[must_use]
    pub fn output_format(&self, config: &Config) -> OutputFormat {
        if let Some(format) = self.output {
            return format;
        }
        if self.robot {
            return OutputFormat::Json;
        }
        config.output.format.parse().unwrap_or(OutputFormat::Human)
    }
}
