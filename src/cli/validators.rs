//! CLI argument validators.

use std::time::Duration;

/// Parse a strictly positive number of seconds.
pub fn parse_positive_secs(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number of seconds"))?;

    if !value.is_finite() || value <= 0.0 {
        return Err(format!("timeout must be greater than 0, got {value}"));
    }

    if Duration::try_from_secs_f64(value).is_err() {
        return Err(format!("timeout of {value}s is too large"));
    }

    Ok(value)
}
