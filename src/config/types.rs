//! Configuration type definitions.

use crate::constants::{DEFAULT_DEVICE_PATH, DEFAULT_OUTPUT_PATH};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Serial device settings.
    pub device: DeviceSettings,

    /// Output file settings.
    pub output: OutputSettings,
}

/// Serial device settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceSettings {
    /// Serial port path or name.
    pub path: String,

    /// Maximum seconds to wait for a reading. Unset waits forever.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_timeout_secs: Option<f64>,
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self {
            path: DEFAULT_DEVICE_PATH.to_string(),
            read_timeout_secs: None,
        }
    }
}

impl DeviceSettings {
    /// Read timeout as a duration, if one is set and valid.
    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout_secs
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }
}

/// Output file settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Path of the CSV log. Truncated on every start.
    pub path: PathBuf,

    /// What to do with lines that are not valid UTF-8.
    pub invalid_lines: InvalidLinePolicy,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            invalid_lines: InvalidLinePolicy::default(),
        }
    }
}

/// Handling of device lines that cannot be decoded as text.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum InvalidLinePolicy {
    /// Log a warning and drop the line.
    #[default]
    Skip,
    /// Record the line with invalid bytes replaced by U+FFFD.
    Lossy,
    /// Stop recording with an error.
    Fail,
}

impl std::fmt::Display for InvalidLinePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Skip => write!(f, "skip"),
            Self::Lossy => write!(f, "lossy"),
            Self::Fail => write!(f, "fail"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.device.path, DEFAULT_DEVICE_PATH);
        assert!(config.device.read_timeout().is_none());
        assert_eq!(config.output.path, PathBuf::from("geiger_data.csv"));
        assert_eq!(config.output.invalid_lines, InvalidLinePolicy::Skip);
    }

    #[test]
    fn test_read_timeout_conversion() {
        let settings = DeviceSettings {
            read_timeout_secs: Some(1.5),
            ..Default::default()
        };
        assert_eq!(settings.read_timeout(), Some(Duration::from_millis(1500)));

        let negative = DeviceSettings {
            read_timeout_secs: Some(-1.0),
            ..Default::default()
        };
        assert!(negative.read_timeout().is_none());
    }

    #[test]
    fn test_policy_display() {
        assert_eq!(InvalidLinePolicy::Skip.to_string(), "skip");
        assert_eq!(InvalidLinePolicy::Lossy.to_string(), "lossy");
        assert_eq!(InvalidLinePolicy::Fail.to_string(), "fail");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str("[output]\ninvalid_lines = \"fail\"\n").unwrap();
        assert_eq!(config.output.invalid_lines, InvalidLinePolicy::Fail);
        assert_eq!(config.device.path, DEFAULT_DEVICE_PATH);
    }
}
