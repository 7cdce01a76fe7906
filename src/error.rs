use std::{fmt::Display, sync::PoisonError};

use bincode::ErrorKind;
use tokio::task::JoinError;

/// Custom Result type for minidb operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for minidb
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Statement matched none of the recognized shapes, carries the statement text
    Syntax(String),
    /// Statement referenced a table that was never created
    UnknownTable(String),
    /// Insert column and value counts differ (strict mode only)
    ColumnMismatch { columns: usize, values: usize },
    /// Internal error (storage, serialization, scheduling, etc.)
    Internal(String),
}

impl<T> From<PoisonError<T>> for Error {
    fn from(value: PoisonError<T>) -> Self {
        Error::Internal(value.to_string())
    }
}

impl From<Box<ErrorKind>> for Error {
    fn from(value: Box<ErrorKind>) -> Self {
        Error::Internal(value.to_string())
    }
}

impl From<JoinError> for Error {
    fn from(value: JoinError) -> Self {
        Error::Internal(value.to_string())
    }
}

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Syntax(statement) => write!(f, "Syntax error: {}", statement),
            Error::UnknownTable(name) => write!(f, "table {} does not exist", name),
            Error::ColumnMismatch { columns, values } => write!(
                f,
                "columns and values num mismatch ({} columns, {} values)",
                columns, values
            ),
            Error::Internal(err) => write!(f, "internal error {}", err),
        }
    }
}
