//! CSV error types.

use thiserror::Error;

use crate::Column;

/// Error returned when reading or writing a ledger fails.
#[derive(Debug, Error)]
pub enum CsvError {
    /// The header row matches neither the current nor the legacy spelling.
    #[error("unexpected CSV headers: {found}")]
    BadHeaders {
        /// The header row as it appeared in the input.
        found: String,
    },
    /// A data row could not be turned into a lot.
    #[error("line {row}, column {column}: {message}")]
    InvalidRow {
        /// Line number of the row in the input.
        row: u64,
        /// The offending column.
        column: Column,
        /// What was wrong with the cell.
        message: String,
    },
    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for CSV operations.
pub type Result<T> = std::result::Result<T, CsvError>;
