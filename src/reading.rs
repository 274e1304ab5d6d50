//! Decoding and framing cleanup of raw device lines.

use crate::config::InvalidLinePolicy;
use crate::constants::{EXPECTED_FIELDS, FIELD_DELIMITER};
use crate::error::{Error, Result};
use std::fmt;
use tracing::warn;

/// One cleaned line as sent by the counter.
///
/// The content is opaque: it is written to the output exactly as received,
/// minus the line terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading(String);

impl Reading {
    /// Wrap already-clean text.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The reading text without any terminator.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split the reading on the device's field delimiter.
    ///
    /// Only used for diagnostics; the recorded row is never altered.
    pub fn fields(&self) -> Vec<&str> {
        self.0.split(FIELD_DELIMITER).collect()
    }

    /// Whether the reading has the usual time/counts/CPM layout.
    pub fn is_well_formed(&self) -> bool {
        self.fields().len() == EXPECTED_FIELDS
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Remove one trailing line terminator (`\r\n`, `\n` or `\r`).
pub fn strip_terminator(raw: &[u8]) -> &[u8] {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    raw.strip_suffix(b"\r").unwrap_or(raw)
}

/// Decode a raw device line and strip its terminator.
///
/// Returns `Ok(None)` when the line is not valid UTF-8 and the policy is
/// [`InvalidLinePolicy::Skip`].
pub fn clean_line(raw: &[u8], policy: InvalidLinePolicy) -> Result<Option<Reading>> {
    let payload = strip_terminator(raw);

    match std::str::from_utf8(payload) {
        Ok(text) => Ok(Some(Reading::new(text))),
        Err(e) => match policy {
            InvalidLinePolicy::Skip => {
                warn!(
                    "Skipping reading that is not valid UTF-8 ({} bytes)",
                    raw.len()
                );
                Ok(None)
            }
            InvalidLinePolicy::Lossy => {
                warn!("Reading contains invalid UTF-8, recording with replacement characters");
                Ok(Some(Reading::new(String::from_utf8_lossy(payload))))
            }
            InvalidLinePolicy::Fail => Err(Error::InvalidReading {
                len: raw.len(),
                source: e,
            }),
        },
    }
}
