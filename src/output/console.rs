//! Live console echo of readings.

use crate::error::{Error, Result};
use crate::output::ReadingSink;
use crate::reading::Reading;
use std::io::{Stdout, Write};

/// Prints each reading on its own line.
///
/// The header is not echoed; the console only shows device output.
pub struct ConsoleEcho<W: Write = Stdout> {
    out: W,
}

impl ConsoleEcho<Stdout> {
    /// Echo to standard output.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ConsoleEcho<W> {
    /// Echo to an arbitrary writer.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the sink and return the wrapped writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

fn console_error(source: std::io::Error) -> Error {
    Error::OutputWrite {
        target: "console".to_string(),
        source,
    }
}

impl<W: Write> ReadingSink for ConsoleEcho<W> {
    fn write_header(&mut self) -> Result<()> {
        Ok(())
    }

    fn write_reading(&mut self, reading: &Reading) -> Result<()> {
        writeln!(self.out, "{reading}").map_err(console_error)?;
        self.out.flush().map_err(console_error)
    }

    fn finalize(&mut self) -> Result<()> {
        self.out.flush().map_err(console_error)
    }
}
