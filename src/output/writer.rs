//! Reading sink trait definition.

use crate::error::Result;
use crate::reading::Reading;

/// Trait for destinations that receive every recorded reading.
pub trait ReadingSink {
    /// Write the header (if applicable).
    fn write_header(&mut self) -> Result<()>;

    /// Write a single reading and make it visible immediately.
    fn write_reading(&mut self, reading: &Reading) -> Result<()>;

    /// Finalize the output (flush, sync, etc.).
    fn finalize(&mut self) -> Result<()>;
}
