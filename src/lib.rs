//! Geiger counter serial logger.
//!
//! Reads newline-terminated readings from a counter attached to a serial
//! port and records each one to a CSV file while echoing it to the console.

#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod constants;
pub mod device;
pub mod error;
pub mod output;
pub mod reading;
pub mod recorder;

use clap::Parser;
use cli::{Cli, Command, ConfigAction, RecordArgs};
use config::{Config, config_file_path, load_default_config, save_default_config};
use constants::INTERRUPT_EXIT_CODE;
use device::{DeviceConfig, LineReader, open_device};
use output::{ConsoleEcho, CsvLog, ReadingSink};
use recorder::Recorder;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{info, warn};

pub use error::{Error, Result};

/// Main entry point for the geiger-logger CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.record.verbose, cli.record.quiet);

    // First Ctrl+C asks the loop to stop so the log is synced; a second one
    // exits immediately.
    let stop = Arc::new(AtomicBool::new(false));
    let handler_stop = Arc::clone(&stop);
    if let Err(e) = ctrlc::set_handler(move || {
        if handler_stop.swap(true, Ordering::SeqCst) {
            std::process::exit(INTERRUPT_EXIT_CODE);
        }
        warn!("Interrupted, stopping");
    }) {
        warn!("Failed to install Ctrl+C handler: {e}");
    }

    if let Some(command) = cli.command {
        return handle_command(command);
    }

    let config = load_default_config()?;
    record(&cli.record, &config, stop)
}

/// Open the device and the log file, then record until a failure or the
/// reading limit.
fn record(args: &RecordArgs, config: &Config, stop: Arc<AtomicBool>) -> Result<()> {
    let device_path = args
        .device
        .clone()
        .unwrap_or_else(|| config.device.path.clone());
    let read_timeout = args
        .read_timeout
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        .or_else(|| config.device.read_timeout());
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| config.output.path.clone());
    let policy = args.on_invalid.unwrap_or(config.output.invalid_lines);

    let device_config = DeviceConfig::new(&device_path).with_read_timeout(read_timeout);
    let port = open_device(&device_config)?;
    let log = CsvLog::create(&output_path)?;

    info!(
        "Recording from {} to {} (invalid lines: {})",
        device_path,
        log.path().display(),
        policy
    );

    let sinks: Vec<Box<dyn ReadingSink>> = vec![Box::new(log), Box::new(ConsoleEcho::stdout())];
    let mut recorder = Recorder::new(
        LineReader::new(port, device_config.read_timeout).with_stop_flag(stop),
        sinks,
        policy,
    );
    recorder.run(args.count)?;

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    // Readings own stdout; diagnostics go to stderr.
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[allow(clippy::print_stdout)]
fn handle_command(command: Command) -> Result<()> {
    match command {
        Command::Config { action } => match action {
            ConfigAction::Init => {
                let path = config_file_path()?;
                if path.exists() {
                    println!("Configuration file already exists: {}", path.display());
                } else {
                    let saved_path = save_default_config(&Config::default())?;
                    println!("Created configuration file: {}", saved_path.display());
                }
                Ok(())
            }
            ConfigAction::Show => {
                let config = load_default_config()?;
                println!("{config:#?}");
                Ok(())
            }
            ConfigAction::Path => {
                println!("{}", config_file_path()?.display());
                Ok(())
            }
        },
    }
}
