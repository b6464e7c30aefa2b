//! Error types for dmn-cells-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in dmn-cells-core
#[derive(Debug, Error)]
pub enum Error {
    /// Row id not present in the table
    #[error("Unknown row: {0}")]
    UnknownRow(String),

    /// Column id not present in the table
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// Row id already used
    #[error("Row id already exists: {0}")]
    DuplicateRow(String),

    /// Column id already used
    #[error("Column id already exists: {0}")]
    DuplicateColumn(String),

    /// Ids must not be empty
    #[error("Invalid id: {0:?}")]
    InvalidId(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }
}
