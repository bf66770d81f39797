//! Readers for the two input log formats.
//!
//! [`LastlogParser`] handles the last-login log: a header line followed by
//! `<username> <port> <date tokens...>` rows, with a literal
//! `**Never logged in**` standing in for the date on unused accounts.
//! Malformed rows are tolerated and skipped.
//!
//! [`UsageParser`] handles the disk usage log: headerless
//! `<bytes> <path>` rows. Unlike the lastlog reader it treats a
//! non-integer byte count as fatal - the numeric field is a hard input
//! contract.

use crate::error::AuditError;
use crate::models::{LastLoginRecord, UsageRecord, NEVER_LOGGED_IN};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Minimum tokens for a lastlog row: username, port, at least one date token.
const LASTLOG_MIN_TOKENS: usize = 3;

/// Minimum tokens for a usage row: byte count and path.
const USAGE_MIN_TOKENS: usize = 2;

fn read_input(path: &Path) -> Result<String, AuditError> {
    fs::read_to_string(path).map_err(|source| AuditError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub struct LastlogParser;

impl LastlogParser {
    /// Read a last-login log file fully, then parse it.
    pub fn parse_file(path: &Path) -> Result<Vec<LastLoginRecord>, AuditError> {
        let content = read_input(path)?;
        let records = Self::parse_lines(content.lines());
        debug!(
            path = %path.display(),
            records = records.len(),
            "parsed last-login log"
        );
        Ok(records)
    }

    /// Parse last-login log lines into ordered records.
    ///
    /// The first line is a header and is discarded unconditionally. Lines
    /// with fewer than three whitespace tokens are skipped without
    /// comment. Token 0 is the username, token 1 (the terminal/port
    /// field) is dropped, and the remaining tokens are rejoined with
    /// single spaces as the raw last-login text.
    pub fn parse_lines<'a>(lines: impl Iterator<Item = &'a str>) -> Vec<LastLoginRecord> {
        let mut records = Vec::new();

        for line in lines.skip(1) {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() < LASTLOG_MIN_TOKENS {
                continue;
            }

            let raw = tokens[2..].join(" ");
            let lastlogin = if raw == NEVER_LOGGED_IN { None } else { Some(raw) };

            records.push(LastLoginRecord {
                user: tokens[0].to_string(),
                lastlogin,
            });
        }

        records
    }
}

pub struct UsageParser;

impl UsageParser {
    /// Read a usage log file fully, then parse it.
    pub fn parse_file(path: &Path) -> Result<Vec<UsageRecord>, AuditError> {
        let content = read_input(path)?;
        let records = Self::parse_lines(content.lines())?;
        debug!(
            path = %path.display(),
            records = records.len(),
            "parsed usage log"
        );
        Ok(records)
    }

    /// Parse usage log lines into ordered records.
    ///
    /// Every line is whitespace-tokenized; lines with fewer than two
    /// tokens are skipped. Token 0 must parse as an unsigned byte count
    /// or the whole read fails. Token 1 is a path; only its final
    /// `/`-delimited segment is kept as the username, so usage logs may
    /// report home-directory paths rather than bare usernames.
    pub fn parse_lines<'a>(
        lines: impl Iterator<Item = &'a str>,
    ) -> Result<Vec<UsageRecord>, AuditError> {
        let mut records = Vec::new();

        for (index, line) in lines.enumerate() {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() < USAGE_MIN_TOKENS {
                continue;
            }

            let usage_bytes: u64 =
                tokens[0]
                    .parse()
                    .map_err(|_| AuditError::MalformedUsage {
                        value: tokens[0].to_string(),
                        line: index + 1,
                    })?;

            let user = tokens[1]
                .rsplit('/')
                .next()
                .unwrap_or(tokens[1])
                .to_string();

            records.push(UsageRecord { user, usage_bytes });
        }

        Ok(records)
    }
}
