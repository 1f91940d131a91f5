//! Error types for the grid engine.
//!
//! Every failure leaves the in-memory model unchanged, so all of these are
//! recoverable by the caller.

use thiserror::Error;

/// Errors produced by grid operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    /// A single cell value failed validation (e.g. non-numeric age).
    #[error("invalid value for '{column}': {reason}")]
    Validation { column: String, reason: String },

    /// Adding a column whose derived id already exists.
    #[error("a column with id '{id}' already exists")]
    DuplicateColumnId { id: String },

    /// A column label that normalizes to an empty id.
    #[error("column label '{label}' does not produce a usable id")]
    InvalidColumnLabel { label: String },

    /// Imported rows failed structural validation.
    #[error("malformed input at row {row}: {reason}")]
    MalformedInput { row: usize, reason: String },

    /// Delimited text could not be parsed.
    #[error("CSV parse error{}: {message}", at_line(.line))]
    Parse {
        line: Option<u64>,
        message: String,
    },

    /// An operation referenced a row that does not exist.
    #[error("unknown row id '{id}'")]
    UnknownRowId { id: String },

    /// Serializing the view failed.
    #[error("export failed: {0}")]
    Export(String),
}

fn at_line(line: &Option<u64>) -> String {
    match line {
        Some(line) => format!(" at line {}", line),
        None => String::new(),
    }
}

impl GridError {
    pub fn validation(column: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            column: column.into(),
            reason: reason.into(),
        }
    }

    pub fn malformed(row: usize, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            row,
            reason: reason.into(),
        }
    }

    pub fn parse(line: Option<u64>, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

impl From<csv::Error> for GridError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line());
        Self::Parse {
            line,
            message: err.to_string(),
        }
    }
}

/// Result type for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;
