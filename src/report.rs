//! Report serialization.
//!
//! Writes the reconciled record set to a tabular file - CSV through the
//! serde-driven `csv` writer, or XLSX through `rust_xlsxwriter`. Both
//! carry the same five columns in order: `user`, `lastlogin`,
//! `time_between`, `status`, `storage_cost`. Absent values are empty
//! cells.

use crate::error::AuditError;
use crate::models::ReconciledRecord;
use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;
use std::str::FromStr;
use tracing::info;

/// Stem of the report file; the extension follows the chosen format.
pub const REPORT_FILE_STEM: &str = "result";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Xlsx,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Xlsx => "xlsx",
        }
    }

    /// Report file name for this format, e.g. `result.csv`.
    pub fn report_file_name(&self) -> String {
        format!("{}.{}", REPORT_FILE_STEM, self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "xlsx" => Ok(OutputFormat::Xlsx),
            _ => Err(AuditError::InvalidOutputFormat(s.trim().to_string())),
        }
    }
}

const REPORT_HEADERS: [&str; 5] = ["user", "lastlogin", "time_between", "status", "storage_cost"];

pub struct ReportWriter;

impl ReportWriter {
    /// Serialize `records` to `path` in the requested format.
    pub fn write(records: &[ReconciledRecord], format: OutputFormat, path: &Path) -> Result<()> {
        match format {
            OutputFormat::Csv => Self::write_csv(records, path),
            OutputFormat::Xlsx => Self::write_xlsx(records, path),
        }?;

        info!(
            path = %path.display(),
            records = records.len(),
            "report written"
        );
        Ok(())
    }

    fn write_csv(records: &[ReconciledRecord], path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("failed to create report file {}", path.display()))?;

        // serialize() emits the header row lazily; an empty report still
        // gets its columns.
        if records.is_empty() {
            writer
                .write_record(REPORT_HEADERS)
                .context("failed to write report header")?;
        }

        for record in records {
            writer.serialize(record).context("failed to write report row")?;
        }

        writer.flush().context("failed to flush report")?;
        Ok(())
    }

    fn write_xlsx(records: &[ReconciledRecord], path: &Path) -> Result<()> {
        let mut workbook = Workbook::new();
        let bold = Format::new().set_bold();
        let sheet = workbook.add_worksheet();

        for (col, header) in REPORT_HEADERS.iter().enumerate() {
            sheet.write_string_with_format(0, col as u16, *header, &bold)?;
        }

        for (index, record) in records.iter().enumerate() {
            let row = (index + 1) as u32;
            sheet.write_string(row, 0, record.user.as_str())?;
            if let Some(lastlogin) = &record.lastlogin {
                sheet.write_string(row, 1, lastlogin.as_str())?;
            }
            sheet.write_string(row, 2, record.time_between.as_str())?;
            sheet.write_string(row, 3, record.status.to_string())?;
            if let Some(cost) = record.storage_cost {
                sheet.write_number(row, 4, cost)?;
            }
        }

        workbook
            .save(path)
            .with_context(|| format!("failed to create report file {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserStatus;

    fn sample() -> Vec<ReconciledRecord> {
        vec![
            ReconciledRecord {
                user: "alice".to_string(),
                lastlogin: Some("Wed Jan 10 08:15:32 +0000 2024".to_string()),
                time_between: "366 Days".to_string(),
                status: UserStatus::Inactive,
                storage_cost: Some(39298950758.4),
            },
            ReconciledRecord {
                user: "bob".to_string(),
                lastlogin: None,
                time_between: "Information not available".to_string(),
                status: UserStatus::Unknown,
                storage_cost: None,
            },
        ]
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("XLSX".parse::<OutputFormat>().unwrap(), OutputFormat::Xlsx);
        assert_eq!(" Csv ".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
    }

    #[test]
    fn test_format_from_str_rejects_unknown() {
        let err = "pdf".parse::<OutputFormat>().unwrap_err();
        assert!(matches!(err, AuditError::InvalidOutputFormat(_)));
        assert!(err.to_string().contains("pdf"));
    }

    #[test]
    fn test_report_file_name() {
        assert_eq!(OutputFormat::Csv.report_file_name(), "result.csv");
        assert_eq!(OutputFormat::Xlsx.report_file_name(), "result.xlsx");
    }

    #[test]
    fn test_csv_columns_and_empty_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.csv");
        ReportWriter::write(&sample(), OutputFormat::Csv, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "user,lastlogin,time_between,status,storage_cost"
        );
        assert!(lines.next().unwrap().starts_with("alice,Wed Jan 10"));
        assert_eq!(
            lines.next().unwrap(),
            "bob,,Information not available,Unknown,"
        );
    }

    #[test]
    fn test_xlsx_file_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.xlsx");
        ReportWriter::write(&sample(), OutputFormat::Xlsx, &path).unwrap();
        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}
