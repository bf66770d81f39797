//! Core Data Models
//!
//! This module defines the data structures that flow through the audit
//! pipeline, from raw log lines to the reconciled report rows.
//!
//! ## Data Flow
//!
//! 1. **Raw Data**: [`LastLoginRecord`], [`UsageRecord`] - one per input line
//! 2. **Reconciliation**: [`ReconciledRecord`] - the joined, classified row
//! 3. **Output**: the report writer and chart renderer consume
//!    [`ReconciledRecord`] sequences as-is
//!
//! All records are created by a single parse or merge pass, held as an
//! ordered sequence, and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Literal a lastlog line carries in place of a timestamp when the
/// account has never been used.
pub const NEVER_LOGGED_IN: &str = "**Never logged in**";

/// Rendered in the `time_between` column when elapsed days are unknown.
pub const UNKNOWN_ELAPSED_LABEL: &str = "Information not available";

/// A single entry from the last-login log.
///
/// `lastlogin` holds the raw timestamp text exactly as found, or `None`
/// when the source carried the [`NEVER_LOGGED_IN`] sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastLoginRecord {
    pub user: String,
    pub lastlogin: Option<String>,
}

/// A single entry from the disk usage log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub user: String,
    pub usage_bytes: u64,
}

/// Account classification after reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserStatus {
    Active,
    Inactive,
    Unknown,
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            UserStatus::Active => "Active",
            UserStatus::Inactive => "Inactive",
            UserStatus::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

/// One row of the final report.
///
/// `status` is `Unknown` exactly when elapsed days could not be computed;
/// `storage_cost` is `None` exactly when the user had no usage entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciledRecord {
    pub user: String,
    pub lastlogin: Option<String>,
    pub time_between: String,
    pub status: UserStatus,
    pub storage_cost: Option<f64>,
}

impl ReconciledRecord {
    /// Display string for a known elapsed-day count.
    pub fn elapsed_label(days: i64) -> String {
        format!("{} Days", days)
    }
}
