//! Error types for dmn-cells-feel
//!
//! Expression parsing itself never errors. These errors cover the
//! conversion of UI tokens (type names, operator names, kinds) from strings.

use thiserror::Error;

/// Result type for feel operations
pub type FeelResult<T> = std::result::Result<T, FeelError>;

/// Errors raised when converting UI tokens from strings
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FeelError {
    /// Type name that is not date, number or string
    #[error("Unknown data type: {0}")]
    UnknownDataType(String),

    /// Operator that is neither a label nor a symbol of the operator table
    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    /// Unknown editing mode name
    #[error("Unknown editing type: {0}")]
    UnknownEditingType(String),

    /// Unknown date or string kind name
    #[error("Unknown kind: {0}")]
    UnknownKind(String),
}
