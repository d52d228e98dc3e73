//! Text to number conversion for measurement columns.
//!
//! Values are parsed with [`exi_model::parse_number`], so surrounding
//! whitespace is ignored and anything `f64` understands is accepted.

use tracing::debug;

use exi_model::parse_number;

use crate::error::{Result, TransformError};

/// Parses every non-null value of `column`, failing on the first that is not a number.
///
/// # Errors
///
/// Returns [`TransformError::NonNumeric`] carrying the column, zero-based row
/// and offending text.
pub fn coerce_strict(column: &str, values: &[Option<String>]) -> Result<Vec<Option<f64>>> {
    values
        .iter()
        .enumerate()
        .map(|(row, value)| match value.as_deref() {
            None => Ok(None),
            Some(text) => parse_number(text)
                .map(Some)
                .ok_or_else(|| TransformError::NonNumeric {
                    column: column.to_string(),
                    row,
                    value: text.to_string(),
                }),
        })
        .collect()
}

/// Parses every value of `column`, turning anything that is not a number into null.
pub fn coerce_lenient(column: &str, values: &[Option<String>]) -> Vec<Option<f64>> {
    let mut coerced = 0usize;
    let parsed: Vec<Option<f64>> = values
        .iter()
        .map(|value| {
            let text = value.as_deref()?;
            let number = parse_number(text);
            if number.is_none() {
                coerced += 1;
            }
            number
        })
        .collect();
    if coerced > 0 {
        debug!(column, coerced, "Set non-numeric values to null");
    }
    parsed
}
