//! Error taxonomy for the audit pipeline.
//!
//! Only [`AuditError::InvalidTimestamp`] is ever recovered from - the
//! reconciliation engine downgrades it to an `Unknown` classification.
//! Every other variant aborts the run and is reported to the user.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    /// No recognizable login timestamp in the text. Swallowed by the
    /// reconciliation engine, never surfaced to the caller.
    #[error("no recognizable timestamp in {0:?}")]
    InvalidTimestamp(String),

    /// A usage line whose byte-count field is not an integer. Fails the
    /// whole run.
    #[error("malformed usage entry on line {line}: {value:?} is not a byte count")]
    MalformedUsage { value: String, line: usize },

    /// Output format selection outside csv/xlsx. Raised before any write.
    #[error("invalid output format {0:?}: expected csv or xlsx")]
    InvalidOutputFormat(String),

    /// Input file could not be read.
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
