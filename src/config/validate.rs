//! Configuration validation.

use crate::config::Config;
use crate::error::{Error, Result};
use std::time::Duration;

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    if config.device.path.trim().is_empty() {
        return Err(Error::ConfigValidation {
            message: "device.path must not be empty".to_string(),
        });
    }

    if let Some(secs) = config.device.read_timeout_secs
        && !(secs > 0.0 && Duration::try_from_secs_f64(secs).is_ok())
    {
        return Err(Error::ConfigValidation {
            message: format!(
                "device.read_timeout_secs must be a positive, representable number of seconds, got {secs}"
            ),
        });
    }

    if config.output.path.as_os_str().is_empty() {
        return Err(Error::ConfigValidation {
            message: "output.path must not be empty".to_string(),
        });
    }

    Ok(())
}
