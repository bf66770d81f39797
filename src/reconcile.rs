//! Reconciliation Engine
//!
//! Joins the last-login and usage record sets by username, computes
//! elapsed days since last login, classifies each account, and computes
//! the storage cost. All business rules of the audit live here; the
//! readers and writers on either side are plain I/O.
//!
//! ## Rules
//!
//! - Output order follows the login records exactly, one row per login
//!   record. Usage entries with no login record are dropped - a
//!   deliberate one-sided join.
//! - A login record matches the first usage entry (in input order) with
//!   the same username; duplicates beyond the first are ignored.
//! - Elapsed days are unknown for the never-logged-in sentinel and for
//!   timestamps the date parser cannot read; the parse failure is
//!   swallowed into an `Unknown` classification rather than propagated.
//!   Treating it as fatal would change user-visible results.
//! - An account with known elapsed days above the inactivity threshold is
//!   `Inactive` and its usage is pro-rated into a byte-months cost;
//!   otherwise a known usage figure passes through unscaled.

use crate::models::{
    LastLoginRecord, ReconciledRecord, UsageRecord, UserStatus, UNKNOWN_ELAPSED_LABEL,
};
use crate::timestamp_parser::TimestampParser;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Tunables for classification and cost pro-rating.
///
/// Supplied to [`Reconciler::new`] rather than read ambiently, so boundary
/// values can be exercised directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReconcileConfig {
    /// Elapsed-days cutoff above which an account is Inactive.
    pub inactive_threshold_days: i64,
    /// Divisor pro-rating raw usage bytes into a byte-months cost.
    pub days_per_month: f64,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            inactive_threshold_days: 365,
            days_per_month: 30.0,
        }
    }
}

pub struct Reconciler {
    config: ReconcileConfig,
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new(ReconcileConfig::default())
    }
}

impl Reconciler {
    pub fn new(config: ReconcileConfig) -> Self {
        Self { config }
    }

    /// Join login and usage records into the reconciled report rows.
    ///
    /// Pure over its inputs and the supplied instant; callers capture
    /// `now` once per run so every row is measured against the same
    /// moment.
    pub fn merge(
        &self,
        logins: &[LastLoginRecord],
        usages: &[UsageRecord],
        now: DateTime<Utc>,
    ) -> Vec<ReconciledRecord> {
        // First occurrence wins on duplicate usernames.
        let mut usage_by_user: HashMap<&str, u64> = HashMap::new();
        for usage in usages {
            usage_by_user
                .entry(usage.user.as_str())
                .or_insert(usage.usage_bytes);
        }

        let records: Vec<ReconciledRecord> = logins
            .iter()
            .map(|login| {
                let elapsed_days = self.elapsed_days(login.lastlogin.as_deref(), now);
                let usage_bytes = usage_by_user.get(login.user.as_str()).copied();

                ReconciledRecord {
                    user: login.user.clone(),
                    lastlogin: login.lastlogin.clone(),
                    time_between: match elapsed_days {
                        Some(days) => ReconciledRecord::elapsed_label(days),
                        None => UNKNOWN_ELAPSED_LABEL.to_string(),
                    },
                    status: self.classify(elapsed_days),
                    storage_cost: self.storage_cost(usage_bytes, elapsed_days),
                }
            })
            .collect();

        debug!(
            logins = logins.len(),
            usages = usages.len(),
            reconciled = records.len(),
            "merged record sets"
        );

        records
    }

    /// Whole days between the recorded last login and `now`, or `None`
    /// when the timestamp is absent or unreadable.
    fn elapsed_days(&self, lastlogin: Option<&str>, now: DateTime<Utc>) -> Option<i64> {
        let text = lastlogin?;
        match TimestampParser::parse(text) {
            Ok(instant) => Some(now.signed_duration_since(instant).num_days()),
            Err(_) => None,
        }
    }

    fn classify(&self, elapsed_days: Option<i64>) -> UserStatus {
        match elapsed_days {
            Some(days) if days > self.config.inactive_threshold_days => UserStatus::Inactive,
            Some(_) => UserStatus::Active,
            None => UserStatus::Unknown,
        }
    }

    /// Cost of the account's storage, `None` without a usage entry.
    ///
    /// Above the inactivity threshold the usage is pro-rated by elapsed
    /// days; at or below it (and for unknown accounts) the raw usage
    /// figure passes through.
    fn storage_cost(&self, usage_bytes: Option<u64>, elapsed_days: Option<i64>) -> Option<f64> {
        let bytes = usage_bytes? as f64;
        match elapsed_days {
            Some(days) if days > self.config.inactive_threshold_days => {
                Some(bytes * (days as f64 / self.config.days_per_month))
            }
            _ => Some(bytes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn login(user: &str, lastlogin: Option<&str>) -> LastLoginRecord {
        LastLoginRecord {
            user: user.to_string(),
            lastlogin: lastlogin.map(str::to_string),
        }
    }

    fn usage(user: &str, usage_bytes: u64) -> UsageRecord {
        UsageRecord {
            user: user.to_string(),
            usage_bytes,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 10, 8, 15, 32).unwrap()
    }

    const ALICE_LOGIN: &str = "Wed Jan 10 08:15:32 +0000 2024";

    #[test]
    fn test_inactive_above_threshold() {
        // 2024 is a leap year: Jan 10 2024 -> Jan 10 2025 is 366 days.
        let reconciler = Reconciler::default();
        let records = reconciler.merge(
            &[login("alice", Some(ALICE_LOGIN))],
            &[usage("alice", 3221225472)],
            now(),
        );

        assert_eq!(records[0].status, UserStatus::Inactive);
        assert_eq!(records[0].time_between, "366 Days");
        let expected = 3221225472.0 * (366.0 / 30.0);
        assert!((records[0].storage_cost.unwrap() - expected).abs() < 1e-6);
    }

    #[test]
    fn test_active_at_threshold() {
        // Exactly 365 days elapsed is still Active, cost unscaled.
        let reconciler = Reconciler::default();
        let at_threshold = Utc.with_ymd_and_hms(2025, 1, 9, 8, 15, 32).unwrap();
        let records = reconciler.merge(
            &[login("alice", Some(ALICE_LOGIN))],
            &[usage("alice", 1000)],
            at_threshold,
        );

        assert_eq!(records[0].time_between, "365 Days");
        assert_eq!(records[0].status, UserStatus::Active);
        assert_eq!(records[0].storage_cost, Some(1000.0));
    }

    #[test]
    fn test_never_logged_in_is_unknown_with_passthrough_cost() {
        let reconciler = Reconciler::default();
        let records = reconciler.merge(&[login("bob", None)], &[usage("bob", 1000)], now());

        assert_eq!(records[0].status, UserStatus::Unknown);
        assert_eq!(records[0].time_between, UNKNOWN_ELAPSED_LABEL);
        assert_eq!(records[0].storage_cost, Some(1000.0));
    }

    #[test]
    fn test_unparseable_timestamp_is_unknown() {
        let reconciler = Reconciler::default();
        let records = reconciler.merge(&[login("carol", Some("logged in**"))], &[], now());

        assert_eq!(records[0].status, UserStatus::Unknown);
        assert_eq!(records[0].time_between, UNKNOWN_ELAPSED_LABEL);
        assert_eq!(records[0].lastlogin.as_deref(), Some("logged in**"));
    }

    #[test]
    fn test_no_usage_entry_means_no_cost() {
        let reconciler = Reconciler::default();
        let records = reconciler.merge(&[login("alice", Some(ALICE_LOGIN))], &[], now());

        assert_eq!(records[0].status, UserStatus::Inactive);
        assert_eq!(records[0].storage_cost, None);
    }

    #[test]
    fn test_usage_only_users_dropped() {
        let reconciler = Reconciler::default();
        let records = reconciler.merge(
            &[login("alice", Some(ALICE_LOGIN))],
            &[usage("alice", 10), usage("zed", 99)],
            now(),
        );

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].user, "alice");
    }

    #[test]
    fn test_duplicate_usage_first_wins() {
        let reconciler = Reconciler::default();
        let records = reconciler.merge(
            &[login("bob", None)],
            &[usage("bob", 100), usage("bob", 999)],
            now(),
        );

        assert_eq!(records[0].storage_cost, Some(100.0));
    }

    #[test]
    fn test_output_follows_login_order() {
        let reconciler = Reconciler::default();
        let records = reconciler.merge(
            &[login("carol", None), login("alice", None), login("bob", None)],
            &[usage("alice", 1), usage("bob", 2), usage("carol", 3)],
            now(),
        );

        let users: Vec<&str> = records.iter().map(|r| r.user.as_str()).collect();
        assert_eq!(users, ["carol", "alice", "bob"]);
    }

    #[test]
    fn test_cost_monotonic_past_threshold() {
        let reconciler = Reconciler::default();
        let cost_at = |days: i64| reconciler.storage_cost(Some(1000), Some(days)).unwrap();

        assert_eq!(cost_at(100), cost_at(365));
        assert!(cost_at(366) > cost_at(365));
        assert!(cost_at(400) > cost_at(366));
    }

    #[test]
    fn test_zero_threshold_config() {
        let reconciler = Reconciler::new(ReconcileConfig {
            inactive_threshold_days: 0,
            days_per_month: 30.0,
        });
        let one_day_ago = Utc.with_ymd_and_hms(2024, 1, 11, 8, 15, 32).unwrap();
        let records = reconciler.merge(
            &[login("alice", Some(ALICE_LOGIN))],
            &[usage("alice", 300)],
            one_day_ago,
        );

        assert_eq!(records[0].status, UserStatus::Inactive);
        let expected = 300.0 * (1.0 / 30.0);
        assert!((records[0].storage_cost.unwrap() - expected).abs() < 1e-9);
    }
}
