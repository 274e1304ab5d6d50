//! Application-wide constants.
//!
//! Fixed line parameters, file layout and defaults live here so the
//! recording behavior is easy to audit in one place.

use std::time::Duration;

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "geiger-logger";

/// Header row written as the first line of every output file.
pub const CSV_HEADER: &str = "Time;Counts;CPM";

/// Field delimiter the device uses inside a reading.
pub const FIELD_DELIMITER: char = ';';

/// Number of fields a well-formed reading carries (time, counts, CPM).
pub const EXPECTED_FIELDS: usize = 3;

/// Default output file path, relative to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "geiger_data.csv";

/// Default serial device identifier for the current platform.
#[cfg(windows)]
pub const DEFAULT_DEVICE_PATH: &str = "COM8";

/// Default serial device identifier for the current platform.
#[cfg(not(windows))]
pub const DEFAULT_DEVICE_PATH: &str = "/dev/ttyUSB0";

/// Fixed serial line parameters.
///
/// These are the customary serial library defaults (9600 8N1, no flow
/// control). The counter is not configurable, so neither are these.
pub mod line {
    use serialport::{DataBits, FlowControl, Parity, StopBits};

    /// Baud rate.
    pub const BAUD_RATE: u32 = 9600;
    /// Data bits per character.
    pub const DATA_BITS: DataBits = DataBits::Eight;
    /// Parity checking.
    pub const PARITY: Parity = Parity::None;
    /// Stop bits per character.
    pub const STOP_BITS: StopBits = StopBits::One;
    /// Flow control.
    pub const FLOW_CONTROL: FlowControl = FlowControl::None;
}

/// Interval at which a blocked read wakes up to account for elapsed time.
///
/// The serial driver needs a finite timeout; waits longer than this are
/// built from repeated polls.
pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Longest raw line accepted from the device, terminator included.
///
/// Counter readings are a few dozen bytes; a stream that exceeds this
/// without a newline is not a counter speaking at the expected baud rate.
pub const MAX_LINE_LEN: usize = 4096;

/// Exit status used when the process is interrupted (128 + SIGINT).
pub const INTERRUPT_EXIT_CODE: i32 = 130;
