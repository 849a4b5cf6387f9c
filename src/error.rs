//! Error handling for dataset operations.

use thiserror::Error;

/// Failures raised by dataset construction, accessors and aggregations.
///
/// Column lookups that simply find nothing are not errors: they return `None`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DatasetError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Unresolved column: {column}")]
    UnresolvedColumn { column: String },

    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },
}

impl DatasetError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn unresolved(column: impl ToString) -> Self {
        Self::UnresolvedColumn {
            column: column.to_string(),
        }
    }

    pub fn type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DatasetError>;
