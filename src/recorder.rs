//! The recording loop: device lines in, log rows and console lines out.

use crate::config::InvalidLinePolicy;
use crate::device::LineSource;
use crate::error::Result;
use crate::output::ReadingSink;
use crate::reading::clean_line;
use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

/// Totals for one recording session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSummary {
    /// When the session started.
    pub started: DateTime<Local>,
    /// Readings written to every sink.
    pub written: u64,
    /// Lines dropped because they could not be decoded.
    pub skipped: u64,
}

impl RecordSummary {
    fn begin() -> Self {
        Self {
            started: Local::now(),
            written: 0,
            skipped: 0,
        }
    }
}

/// Owns the device line source and the output sinks for one session.
///
/// Sinks receive the header once, then every reading in the order they were
/// registered. All sinks are finalized before [`Recorder::run`] returns,
/// whether it succeeds or fails.
pub struct Recorder<'a, S: LineSource> {
    source: S,
    sinks: Vec<Box<dyn ReadingSink + 'a>>,
    policy: InvalidLinePolicy,
}

impl<'a, S: LineSource> Recorder<'a, S> {
    /// Create a recorder.
    pub fn new(source: S, sinks: Vec<Box<dyn ReadingSink + 'a>>, policy: InvalidLinePolicy) -> Self {
        Self {
            source,
            sinks,
            policy,
        }
    }

    /// Write headers and record readings until `limit` readings have been
    /// written, or forever when `limit` is `None`.
    ///
    /// Any read, decode or write failure ends the session. Sinks are still
    /// finalized, and the original failure is returned.
    pub fn run(&mut self, limit: Option<u64>) -> Result<RecordSummary> {
        let mut summary = RecordSummary::begin();
        info!("Recording started at {}", summary.started.format("%Y-%m-%d %H:%M:%S"));

        match self.record(limit, &mut summary) {
            Ok(()) => {
                self.finalize_all()?;
                info!(
                    "Recording finished: {} readings written, {} skipped",
                    summary.written, summary.skipped
                );
                Ok(summary)
            }
            Err(e) => {
                self.finalize_after_failure();
                info!(
                    "Recording stopped after {} readings ({} skipped)",
                    summary.written, summary.skipped
                );
                Err(e)
            }
        }
    }

    fn record(&mut self, limit: Option<u64>, summary: &mut RecordSummary) -> Result<()> {
        for sink in &mut self.sinks {
            sink.write_header()?;
        }

        while limit.is_none_or(|n| summary.written < n) {
            let raw = self.source.read_line()?;

            let Some(reading) = clean_line(&raw, self.policy)? else {
                summary.skipped += 1;
                continue;
            };

            if reading.is_well_formed() {
                debug!("Reading: {reading}");
            } else {
                warn!(
                    "Reading has {} fields, expected time;counts;cpm: {reading}",
                    reading.fields().len()
                );
            }

            for sink in &mut self.sinks {
                sink.write_reading(&reading)?;
            }
            summary.written += 1;
        }

        Ok(())
    }

    fn finalize_all(&mut self) -> Result<()> {
        for sink in &mut self.sinks {
            sink.finalize()?;
        }
        Ok(())
    }

    fn finalize_after_failure(&mut self) {
        for sink in &mut self.sinks {
            if let Err(e) = sink.finalize() {
                warn!("Failed to finalize output: {e}");
            }
        }
    }
}
