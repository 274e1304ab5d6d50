//! CLI argument definitions.

use crate::cli::validators::parse_positive_secs;
use crate::config::InvalidLinePolicy;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Record Geiger counter readings from a serial port to a CSV file.
#[derive(Debug, Parser)]
#[command(name = "geiger-logger")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Recording options.
    #[command(flatten)]
    pub record: RecordArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for recording.
#[derive(Debug, Args)]
pub struct RecordArgs {
    /// Serial device (e.g., /dev/ttyUSB0, COM8).
    #[arg(short, long, env = "GEIGER_DEVICE")]
    pub device: Option<String>,

    /// Output CSV file. Existing contents are replaced.
    #[arg(short, long, env = "GEIGER_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Give up when no complete reading arrives within this many seconds.
    #[arg(long, value_parser = parse_positive_secs, env = "GEIGER_READ_TIMEOUT")]
    pub read_timeout: Option<f64>,

    /// How to handle lines that are not valid UTF-8.
    #[arg(long, value_enum)]
    pub on_invalid: Option<InvalidLinePolicy>,

    /// Stop after recording this many readings.
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u64).range(1..))]
    pub count: Option<u64>,

    /// Only log warnings and errors.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Increase log verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
