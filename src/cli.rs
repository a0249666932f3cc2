//! CLI argument parsing for bcfuzz-eval

use crate::ranksum::{Alternative, Method};
use crate::stats::MAX_PRECISION;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for report results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Console layout of the campaign scripts (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "bcfuzz-eval")]
#[command(version)]
#[command(
    about = "Summarize and compare fuzzing campaign results with rank-sum tests",
    long_about = None
)]
pub struct Cli {
    /// Output format
    #[arg(long = "format", value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Enable debug tracing output to stderr
    #[arg(long = "debug", global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the built-in reports
    List,

    /// Run built-in reports by name
    Report {
        /// Report names (see `list`)
        #[arg(value_name = "NAME", required_unless_present = "all")]
        names: Vec<String>,

        /// Run every built-in report
        #[arg(long, conflicts_with = "names")]
        all: bool,
    },

    /// Run every report of a TOML experiment file
    Run {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Compare two ad hoc samples
    Compare {
        /// First sample, comma separated (e.g. --x 2,3,1,2,1)
        #[arg(long = "x", value_name = "VALUES", value_delimiter = ',', required = true, allow_negative_numbers = true)]
        x: Vec<f64>,

        /// Second sample, comma separated
        #[arg(long = "y", value_name = "VALUES", value_delimiter = ',', required = true, allow_negative_numbers = true)]
        y: Vec<f64>,

        /// Alternative hypothesis for the first sample
        #[arg(long = "alternative", value_enum, default_value = "less")]
        alternative: Alternative,

        /// Apply continuity correction to the normal approximation
        #[arg(long = "continuity")]
        continuity: bool,

        /// p-value computation
        #[arg(long = "method", value_enum, default_value = "auto")]
        method: Method,

        /// Decimal digits for the printed means (at most 17)
        #[arg(
            long = "precision",
            value_name = "DIGITS",
            default_value = "2",
            value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_PRECISION))
        )]
        precision: u32,
    },

    /// Print built-in reports as a TOML experiment file
    Export {
        /// Report names (all when omitted)
        #[arg(value_name = "NAME")]
        names: Vec<String>,
    },

    /// Render the bar chart with error bars to SVG
    Chart {
        /// Output path
        #[arg(short, long, value_name = "PATH", default_value = "bar_err.svg")]
        output: PathBuf,

        /// Experiment file with a [chart] table (embedded example when omitted)
        #[arg(long = "data", value_name = "FILE")]
        data: Option<PathBuf>,
    },
}
