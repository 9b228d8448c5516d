// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading and aggregating search results.
/// Every failure is terminal for its unit of work (row, file, or run);
/// there are no retries and no partial results.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The header and a data row disagree on field count.
    #[error("schema mismatch at line {line}: header has {expected} columns, row has {found}")]
    SchemaMismatch {
        expected: usize,
        found: usize,
        line: usize,
    },

    /// A required column name is absent from the header.
    #[error("required column {name:?} not found in header")]
    MissingColumn { name: &'static str },

    /// The quality-score field could not be parsed as a float.
    #[error("malformed quality score {value:?} at line {line}")]
    MalformedNumber { value: String, line: usize },

    /// A bracketed modification annotation did not resolve in the index.
    #[error("unknown modification {token:?} in full sequence")]
    UnknownModification { token: String },

    /// Report row width disagrees with the declared column schema.
    /// This is an internal invariant and indicates a programming defect.
    #[error("report row has {found} values but the schema declares {expected} columns")]
    ColumnCountMismatch { expected: usize, found: usize },

    /// No GPTMD database XML found in a result folder.
    #[error("no GPTMD database XML found under {}", folder.display())]
    MissingDatabase { folder: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
