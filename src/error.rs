//! Error types for geiger-logger.

use std::path::PathBuf;

/// Result type alias for geiger-logger operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for geiger-logger.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Failed to open the serial device.
    #[error("failed to open serial device '{path}'")]
    DeviceOpen {
        /// Device identifier.
        path: String,
        /// Underlying serial port error.
        #[source]
        source: serialport::Error,
    },

    /// Reading from the serial device failed.
    #[error("failed to read from serial device")]
    DeviceRead {
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The device stopped sending data for longer than the read timeout.
    #[error("no complete reading received within {timeout_secs:.1}s")]
    ReadTimeout {
        /// Configured timeout in seconds.
        timeout_secs: f64,
    },

    /// The device sent more than the line limit without a newline.
    #[error("device sent {limit} bytes without a line terminator")]
    LineTooLong {
        /// Line length limit in bytes.
        limit: usize,
    },

    /// Recording was stopped by Ctrl+C.
    #[error("interrupted")]
    Interrupted,

    /// The device closed the connection.
    #[error("serial device disconnected")]
    DeviceDisconnected,

    /// A line from the device is not valid UTF-8 text.
    #[error("reading is not valid UTF-8 text ({len} bytes)")]
    InvalidReading {
        /// Length of the offending raw line.
        len: usize,
        /// Underlying decode error.
        #[source]
        source: std::str::Utf8Error,
    },

    /// Failed to create or truncate the output file.
    #[error("failed to open output file '{path}'")]
    OutputOpen {
        /// Path to the output file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write to an output sink.
    #[error("failed to write to {target}")]
    OutputWrite {
        /// Human-readable name of the sink (file path or "console").
        target: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
