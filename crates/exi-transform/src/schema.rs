//! Typed measurement columns.
//!
//! After this stage every measurement column is `Float64`, collimation is
//! split into its two field dimensions, and rows without a usable DAP are gone.

use polars::prelude::DataFrame;
use tracing::{debug, info};

use exi_model::{COLLIMATION, COLLIMATION_1, COLLIMATION_2, DAP, DOSE, Measure};

use crate::error::Result;
use crate::frame::{float_values, keep_rows, require_columns, set_float_column, text_values};
use crate::normalization::{coerce_lenient, coerce_strict};

/// Result of [`transform`].
#[derive(Debug, Clone)]
pub struct SchemaOutcome {
    pub frame: DataFrame,
    /// Rows dropped because `DAP` was zero or missing.
    pub zero_dap_rows_removed: usize,
    /// Non-null collimation values that did not split into two parts.
    pub malformed_collimation: usize,
}

/// Splits a collimation value such as `"35x43"` into its two dimensions.
///
/// Returns `None` unless the value holds exactly one `x` with text on both
/// sides. The parts are trimmed.
///
/// ```
/// use exi_transform::split_collimation;
///
/// assert_eq!(split_collimation("35 x 43"), Some(("35", "43")));
/// assert_eq!(split_collimation("35"), None);
/// assert_eq!(split_collimation("1x2x3"), None);
/// ```
pub fn split_collimation(value: &str) -> Option<(&str, &str)> {
    let (first, second) = value.split_once('x')?;
    if second.contains('x') {
        return None;
    }
    let (first, second) = (first.trim(), second.trim());
    if first.is_empty() || second.is_empty() {
        return None;
    }
    Some((first, second))
}

/// Adds `Collimation 1` and `Collimation 2` as text columns derived from `Collimation`.
///
/// Returns the number of non-null values that could not be split; both parts
/// are null for those rows.
pub fn add_collimation_parts(df: &mut DataFrame) -> Result<usize> {
    let raw = text_values(df, COLLIMATION)?;
    let mut first = Vec::with_capacity(raw.len());
    let mut second = Vec::with_capacity(raw.len());
    let mut malformed = 0usize;

    for (row, value) in raw.iter().enumerate() {
        let parts = value.as_deref().map(|text| (text, split_collimation(text)));
        match parts {
            Some((_, Some((a, b)))) => {
                first.push(Some(a.to_string()));
                second.push(Some(b.to_string()));
            }
            Some((text, None)) => {
                debug!(row, value = text, "Malformed collimation");
                malformed += 1;
                first.push(None);
                second.push(None);
            }
            None => {
                first.push(None);
                second.push(None);
            }
        }
    }

    set_float_column(df, COLLIMATION_1, coerce_strict(COLLIMATION_1, &first)?)?;
    set_float_column(df, COLLIMATION_2, coerce_strict(COLLIMATION_2, &second)?)?;
    Ok(malformed)
}

/// Converts every measurement column to `Float64`.
///
/// `Dose` is coerced leniently; all other measurements must parse.
pub fn coerce_measurements(df: &mut DataFrame) -> Result<()> {
    for measure in Measure::ALL {
        let name = measure.column();
        let values = text_values(df, name)?;
        let numbers = if measure.is_strict() {
            coerce_strict(name, &values)?
        } else {
            coerce_lenient(name, &values)
        };
        set_float_column(df, name, numbers)?;
    }
    Ok(())
}

/// Drops rows whose `DAP` is zero or missing.
pub fn drop_zero_dap(df: DataFrame) -> Result<(DataFrame, usize)> {
    let keep: Vec<bool> = float_values(&df, DAP)?
        .into_iter()
        .map(|dap| dap.is_some_and(|value| value != 0.0))
        .collect();
    keep_rows(df, &keep)
}

/// Splits collimation, coerces measurements and drops zero-DAP rows, in that order.
///
/// # Errors
///
/// Fails with [`TransformError::MissingColumn`](crate::TransformError::MissingColumn)
/// when a measurement column is absent and with
/// [`TransformError::NonNumeric`](crate::TransformError::NonNumeric) when a
/// strict column holds text that is not a number.
pub fn transform(mut df: DataFrame) -> Result<SchemaOutcome> {
    require_columns(&df, &[COLLIMATION, DOSE])?;

    let malformed_collimation = add_collimation_parts(&mut df)?;
    coerce_measurements(&mut df)?;
    let (frame, zero_dap_rows_removed) = drop_zero_dap(df)?;

    info!(
        zero_dap_rows_removed,
        malformed_collimation,
        rows = frame.height(),
        "Typed measurement columns"
    );

    Ok(SchemaOutcome {
        frame,
        zero_dap_rows_removed,
        malformed_collimation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TransformError;
    use crate::frame::text_column;
    use polars::prelude::{Column, DataType};

    fn col(name: &str, values: &[Option<&str>]) -> Column {
        text_column(name, values.iter().map(|v| v.map(str::to_string)).collect())
    }

    fn frame(dap: &[Option<&str>], collimation: &[Option<&str>]) -> DataFrame {
        let n = dap.len();
        let filled = |value: &'static str| vec![Some(value); n];
        DataFrame::new(vec![
            col("OGP", &filled("Hand")),
            col("kV", &filled("52")),
            col("mAs", &filled("1.6")),
            col("DAP", dap),
            col("Clinical EXI", &filled("310")),
            col("Collimation", collimation),
            col("SID", &filled("110")),
            col("Dose", &filled("")),
        ])
        .unwrap()
    }

    #[test]
    fn test_split_edge_cases() {
        assert_eq!(split_collimation("24x30"), Some(("24", "30")));
        assert_eq!(split_collimation("x30"), None);
        assert_eq!(split_collimation("24x"), None);
        assert_eq!(split_collimation("24X30"), None);
    }

    #[test]
    fn test_transform_types_and_filters() {
        let df = frame(
            &[Some("1.5"), Some("0"), None, Some("2.5")],
            &[Some("24x30"), Some("24x30"), Some("18x24"), Some("bad")],
        );

        let outcome = transform(df).unwrap();

        assert_eq!(outcome.zero_dap_rows_removed, 2);
        assert_eq!(outcome.malformed_collimation, 1);
        let frame = outcome.frame;
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.column("DAP").unwrap().dtype(), &DataType::Float64);
        assert_eq!(
            float_values(&frame, COLLIMATION_1).unwrap(),
            vec![Some(24.0), None]
        );
        assert_eq!(
            float_values(&frame, COLLIMATION_2).unwrap(),
            vec![Some(30.0), None]
        );
        assert_eq!(float_values(&frame, DOSE).unwrap(), vec![None, None]);
    }

    #[test]
    fn test_non_numeric_dap_is_fatal() {
        let df = frame(&[Some("1.5"), Some("high")], &[None, None]);
        let err = transform(df).unwrap_err();
        assert!(matches!(
            err,
            TransformError::NonNumeric { ref column, row: 1, .. } if column == "DAP"
        ));
    }

    #[test]
    fn test_missing_collimation_column() {
        let df = DataFrame::new(vec![col("DAP", &[Some("1")])]).unwrap();
        assert!(matches!(
            transform(df).unwrap_err(),
            TransformError::MissingColumn { .. }
        ));
    }
}
