//! Serial device access and line framing.

mod line_reader;
mod port;

pub use line_reader::{LineReader, LineSource};
pub use port::{DeviceConfig, open_device};
