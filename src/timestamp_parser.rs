//! Parses the timestamp embedded in a last-login log line.

use crate::error::AuditError;
use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::OnceLock;

/// `Wed Jan 10 08:15:32 +0000 2024`, possibly embedded in a longer line.
const TIMESTAMP_PATTERN: &str = r"(\w{3} \w{3} \d{1,2} \d{2}:\d{2}:\d{2} [+-]\d{4} \d{4})";

/// chrono equivalent of the pattern above.
const TIMESTAMP_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

static TIMESTAMP_RE: OnceLock<Regex> = OnceLock::new();

/// Handles parsing the lastlog timestamp format into an absolute instant
pub struct TimestampParser;

impl TimestampParser {
    /// Scan `text` for a timestamp substring and parse it to UTC.
    ///
    /// The text may carry leading or trailing content around the
    /// timestamp; only the first match is used. Returns
    /// [`AuditError::InvalidTimestamp`] when no substring matches, which
    /// callers must treat as "elapsed time unknown".
    pub fn parse(text: &str) -> Result<DateTime<Utc>, AuditError> {
        let re = TIMESTAMP_RE
            .get_or_init(|| Regex::new(TIMESTAMP_PATTERN).expect("timestamp pattern is valid"));

        let matched = re
            .captures(text)
            .and_then(|caps| caps.get(1))
            .ok_or_else(|| AuditError::InvalidTimestamp(text.to_string()))?;

        DateTime::parse_from_str(matched.as_str(), TIMESTAMP_FORMAT)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| AuditError::InvalidTimestamp(text.to_string()))
    }
}
