mod format;

use crate::config::FilterConfig;
use clap::{ArgAction, Parser, Subcommand};
pub use format::OutputFormat;
use std::path::PathBuf;

/// Canonicalize series filters and run them against series files
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true, env = "SERIES_FILTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format, overrides the config file
    #[arg(short = 'F', long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Also write the output to this file
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the canonical form of a filter
    Optimize {
        /// Filter in JSON wire form, '@path' to read a file or '-' for stdin
        filter: String,
    },
    /// Check whether two filters share the same canonical form
    Compare {
        /// First filter (JSON wire form, '@path' or '-')
        left: String,

        /// Second filter (JSON wire form, '@path' or '-')
        right: String,
    },
    /// Print the series in a file that match a filter
    FindSeries {
        /// File with one JSON series per line
        #[arg(short, long)]
        series: PathBuf,

        /// Limit the number of printed series
        #[arg(long)]
        limit: Option<usize>,

        /// Filter in JSON wire form, '@path' to read a file or '-' for stdin
        filter: String,
    },
}

impl Cli {
    pub fn effective_format(&self, config: &FilterConfig) -> OutputFormat {
        self.format
            .unwrap_or_else(|| OutputFormat::from(config.output.format))
    }

    /// Default log filter when RUST_LOG is not set
    pub fn log_level<'a>(&self, config: &'a FilterConfig) -> &'a str {
        if self.quiet {
            return "error";
        }

        match self.verbose {
            0 => config.logging.level.as_str(),
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

pub fn cli_parse() -> Cli {
    Cli::parse()
}
