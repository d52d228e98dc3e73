//! Error types for the cleaning stages.

use thiserror::Error;

/// Errors raised while cleaning or aggregating the unified table.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A column the stage needs is not present after normalization.
    #[error("required column not found: {column}")]
    MissingColumn { column: String },

    /// A value in a numeric column could not be parsed.
    #[error("non-numeric value {value:?} in column {column} at row {row}")]
    NonNumeric {
        column: String,
        row: usize,
        value: String,
    },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl TransformError {
    pub(crate) fn missing(column: &str) -> Self {
        Self::MissingColumn {
            column: column.to_string(),
        }
    }
}

impl From<polars::prelude::PolarsError> for TransformError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;
