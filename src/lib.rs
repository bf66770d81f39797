//! Storage Audit Library
//!
//! Reconciles two plain-text system reports - a per-user last-login log
//! and a per-user disk usage log - into a single report classifying each
//! account as Active, Inactive, or Unknown and estimating a storage cost
//! for inactive accounts.
//!
//! ## Pipeline
//!
//! Data flows one way: raw text -> typed records -> reconciled records ->
//! {tabular report, chart image}.
//!
//! - [`parser`] - readers for the two input log formats
//! - [`timestamp_parser`] - lastlog timestamp string -> absolute instant
//! - [`reconcile`] - the join, classification, and cost rules
//! - [`report`] - CSV/XLSX serialization of the reconciled records
//! - [`chart`] - top-ten storage cost bar chart (PNG)
//! - [`audit`] - end-to-end run coordination
//! - [`models`] - record types shared across the pipeline
//! - [`error`] - typed error taxonomy
//! - [`config`] - tunables, file and environment configuration
//! - [`logging`] - structured logging setup
//!
//! ## Main Entry Point
//!
//! The primary interface is [`StorageAuditor`]:
//!
//! ```no_run
//! use storage_audit::audit::{AuditOptions, StorageAuditor};
//! use storage_audit::report::OutputFormat;
//! use std::path::PathBuf;
//!
//! # fn example() -> anyhow::Result<()> {
//! let auditor = StorageAuditor::default();
//! let outcome = auditor.run(&AuditOptions {
//!     lastlog_path: PathBuf::from("lastlog.txt"),
//!     usage_path: PathBuf::from("usage.txt"),
//!     output_dir: PathBuf::from("."),
//!     format: OutputFormat::Csv,
//!     sort_by_cost: false,
//! })?;
//! println!("{} records reconciled", outcome.record_count);
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod chart;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod parser;
pub mod reconcile;
pub mod report;
pub mod timestamp_parser;

pub use audit::StorageAuditor;
pub use error::AuditError;
pub use models::*;
