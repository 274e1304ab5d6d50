//! Serial port configuration and connection.

use crate::constants::{DEFAULT_DEVICE_PATH, POLL_INTERVAL, line};
use crate::error::{Error, Result};
use serialport::SerialPort;
use std::time::Duration;
use tracing::{debug, info};

/// Settings for the serial connection to the counter.
///
/// Line parameters are fixed (see [`crate::constants::line`]); only the
/// device identifier and the read timeout vary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceConfig {
    /// Serial port path (e.g., `/dev/ttyUSB0`, `COM8`).
    pub path: String,
    /// Longest wait for a complete reading. `None` blocks indefinitely.
    pub read_timeout: Option<Duration>,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_DEVICE_PATH.to_string(),
            read_timeout: None,
        }
    }
}

impl DeviceConfig {
    /// Create a configuration for the given device with no read timeout.
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            ..Default::default()
        }
    }

    /// Set the read timeout.
    #[must_use]
    pub fn with_read_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.read_timeout = timeout;
        self
    }
}

/// Open the serial device with the fixed line parameters.
///
/// The port's own timeout is the poll interval; [`super::LineReader`]
/// stretches it to the configured read timeout (or forever).
pub fn open_device(config: &DeviceConfig) -> Result<Box<dyn SerialPort>> {
    debug!(
        "Opening {} at {} baud, poll interval {:?}",
        config.path,
        line::BAUD_RATE,
        POLL_INTERVAL
    );

    let port = serialport::new(&config.path, line::BAUD_RATE)
        .data_bits(line::DATA_BITS)
        .parity(line::PARITY)
        .stop_bits(line::STOP_BITS)
        .flow_control(line::FLOW_CONTROL)
        .timeout(POLL_INTERVAL)
        .open()
        .map_err(|e| Error::DeviceOpen {
            path: config.path.clone(),
            source: e,
        })?;

    info!("Connected to {} at {} baud", config.path, line::BAUD_RATE);
    Ok(port)
}
