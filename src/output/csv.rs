//! Semicolon-separated reading log.

use crate::constants::CSV_HEADER;
use crate::error::{Error, Result};
use crate::output::ReadingSink;
use crate::reading::Reading;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// CSV log file writer.
///
/// Rows are the device lines verbatim: no quoting, no escaping. Every row
/// is flushed as soon as it is written.
pub struct CsvLog {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl CsvLog {
    /// Create the log file, truncating any previous contents.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|e| Error::OutputOpen {
            path: path.to_path_buf(),
            source: e,
        })?;
        debug!("Opened output file {}", path.display());

        Ok(Self {
            writer: BufWriter::new(file),
            path: path.to_path_buf(),
        })
    }

    /// Path of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{line}")
            .and_then(|()| self.writer.flush())
            .map_err(|e| self.write_error(e))
    }

    fn write_error(&self, source: std::io::Error) -> Error {
        Error::OutputWrite {
            target: self.path.display().to_string(),
            source,
        }
    }
}

impl ReadingSink for CsvLog {
    fn write_header(&mut self) -> Result<()> {
        self.write_line(CSV_HEADER)
    }

    fn write_reading(&mut self, reading: &Reading) -> Result<()> {
        self.write_line(reading.as_str())
    }

    fn finalize(&mut self) -> Result<()> {
        self.writer.flush().map_err(|e| self.write_error(e))?;
        self.writer
            .get_ref()
            .sync_all()
            .map_err(|e| self.write_error(e))
    }
}
