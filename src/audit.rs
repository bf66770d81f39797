//! End-to-end audit run coordination.
//!
//! [`StorageAuditor`] drives the whole pipeline: read both input logs
//! fully, reconcile them against a single captured instant, optionally
//! re-sort by storage cost, then hand the records to the report writer
//! and the chart renderer.

use crate::chart;
use crate::models::ReconciledRecord;
use crate::parser::{LastlogParser, UsageParser};
use crate::reconcile::{ReconcileConfig, Reconciler};
use crate::report::{OutputFormat, ReportWriter};
use anyhow::Result;
use chrono::Utc;
use std::cmp::Ordering;
use std::path::PathBuf;
use tracing::info;

/// Options for a single audit run.
#[derive(Debug, Clone)]
pub struct AuditOptions {
    pub lastlog_path: PathBuf,
    pub usage_path: PathBuf,
    pub output_dir: PathBuf,
    pub format: OutputFormat,
    pub sort_by_cost: bool,
}

/// Artifacts produced by a completed run.
#[derive(Debug, Clone)]
pub struct AuditOutcome {
    pub report_path: PathBuf,
    pub chart_path: PathBuf,
    pub record_count: usize,
}

pub struct StorageAuditor {
    reconciler: Reconciler,
}

impl Default for StorageAuditor {
    fn default() -> Self {
        Self::new(ReconcileConfig::default())
    }
}

impl StorageAuditor {
    pub fn new(config: ReconcileConfig) -> Self {
        Self {
            reconciler: Reconciler::new(config),
        }
    }

    /// Run the full pipeline and return the artifact paths.
    pub fn run(&self, options: &AuditOptions) -> Result<AuditOutcome> {
        let logins = LastlogParser::parse_file(&options.lastlog_path)?;
        let usages = UsageParser::parse_file(&options.usage_path)?;

        // One instant per run keeps every row measured against the same
        // moment.
        let now = Utc::now();
        let mut records = self.reconciler.merge(&logins, &usages, now);

        if options.sort_by_cost {
            sort_by_cost_descending(&mut records);
        }

        let report_path = options.output_dir.join(options.format.report_file_name());
        ReportWriter::write(&records, options.format, &report_path)?;

        let chart_path = options.output_dir.join(chart::CHART_FILE_NAME);
        chart::render_top_users(&records, &chart_path)?;

        info!(
            report = %report_path.display(),
            chart = %chart_path.display(),
            records = records.len(),
            "audit complete"
        );

        Ok(AuditOutcome {
            report_path,
            chart_path,
            record_count: records.len(),
        })
    }
}

/// Sort descending by storage cost; records without a cost go last.
pub fn sort_by_cost_descending(records: &mut [ReconciledRecord]) {
    records.sort_by(|a, b| match (a.storage_cost, b.storage_cost) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserStatus;

    fn record(user: &str, storage_cost: Option<f64>) -> ReconciledRecord {
        ReconciledRecord {
            user: user.to_string(),
            lastlogin: None,
            time_between: "Information not available".to_string(),
            status: UserStatus::Unknown,
            storage_cost,
        }
    }

    #[test]
    fn test_sort_descending_nulls_last() {
        let mut records = vec![
            record("none", None),
            record("small", Some(10.0)),
            record("big", Some(1000.0)),
        ];

        sort_by_cost_descending(&mut records);

        let users: Vec<&str> = records.iter().map(|r| r.user.as_str()).collect();
        assert_eq!(users, ["big", "small", "none"]);
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let mut records = vec![
            record("first", Some(5.0)),
            record("second", Some(5.0)),
            record("third", None),
            record("fourth", None),
        ];

        sort_by_cost_descending(&mut records);

        let users: Vec<&str> = records.iter().map(|r| r.user.as_str()).collect();
        assert_eq!(users, ["first", "second", "third", "fourth"]);
    }
}
