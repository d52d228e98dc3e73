//! Row sanitizing: comma-contaminated rows, duplicate records, and label prefixes.
//!
//! Some firmware writes unquoted commas inside fields, which shifts the values
//! of that row into the wrong columns. Such rows cannot be repaired, so they
//! are dropped before duplicates are resolved.

use std::collections::HashSet;

use polars::prelude::DataFrame;
use tracing::{debug, info};

use exi_model::{CLINICAL_EXI, OGP, SOP_INSTANCE_UID};

use crate::error::Result;
use crate::frame::{column_text, keep_rows, require_columns, set_text_column, text_values};
use crate::options::CleaningOptions;

/// Result of [`sanitize`].
#[derive(Debug, Clone)]
pub struct SanitizeOutcome {
    pub frame: DataFrame,
    pub comma_rows_removed: usize,
    pub duplicate_rows_removed: usize,
}

/// Drops every row in which any field contains `separator`.
///
/// Returns the filtered frame and the number of rows removed.
pub fn drop_separator_rows(df: DataFrame, separator: char) -> Result<(DataFrame, usize)> {
    let mut keep = vec![true; df.height()];
    for column in df.get_columns() {
        for (row, value) in column_text(column).into_iter().enumerate() {
            if value.is_some_and(|text| text.contains(separator)) {
                if keep[row] {
                    debug!(row, column = %column.name(), "Row contains separator");
                }
                keep[row] = false;
            }
        }
    }
    keep_rows(df, &keep)
}

/// Keeps the first row for each `SOP Instance UID`.
///
/// Rows without a UID are treated as sharing one value, so only the first of
/// them survives.
pub fn drop_duplicate_records(df: DataFrame) -> Result<(DataFrame, usize)> {
    let uids = text_values(&df, SOP_INSTANCE_UID)?;
    let mut seen: HashSet<Option<String>> = HashSet::with_capacity(uids.len());
    let keep: Vec<bool> = uids.into_iter().map(|uid| seen.insert(uid)).collect();
    keep_rows(df, &keep)
}

/// Strips the warning marker from `Clinical EXI` and leading junk from `OGP`.
///
/// Each `OGP` character in [`CleaningOptions::ogp_junk`] is removed at most
/// once, in order, so `"  Hand"` keeps one leading space.
pub fn strip_prefixes(mut df: DataFrame, options: &CleaningOptions) -> Result<DataFrame> {
    let exi: Vec<Option<String>> = text_values(&df, CLINICAL_EXI)?
        .into_iter()
        .map(|value| value.map(|text| strip_exi_marker(&text, &options.exi_marker)))
        .collect();
    set_text_column(&mut df, CLINICAL_EXI, exi)?;

    let labels: Vec<Option<String>> = text_values(&df, OGP)?
        .into_iter()
        .map(|value| value.map(|text| strip_label(&text, &options.ogp_junk)))
        .collect();
    set_text_column(&mut df, OGP, labels)?;

    Ok(df)
}

fn strip_exi_marker(value: &str, marker: &str) -> String {
    value.strip_prefix(marker).unwrap_or(value).to_string()
}

fn strip_label(value: &str, junk: &[char]) -> String {
    junk.iter()
        .fold(value, |label, &ch| label.strip_prefix(ch).unwrap_or(label))
        .to_string()
}

/// Runs the separator filter, the duplicate filter and prefix stripping in order.
///
/// # Errors
///
/// Fails with [`TransformError::MissingColumn`](crate::TransformError::MissingColumn)
/// when `SOP Instance UID`, `OGP` or `Clinical EXI` is absent.
pub fn sanitize(df: DataFrame, options: &CleaningOptions) -> Result<SanitizeOutcome> {
    require_columns(&df, &[SOP_INSTANCE_UID, OGP, CLINICAL_EXI])?;

    let (df, comma_rows_removed) = drop_separator_rows(df, options.separator)?;
    let (df, duplicate_rows_removed) = drop_duplicate_records(df)?;
    let frame = strip_prefixes(df, options)?;

    info!(
        comma_rows_removed,
        duplicate_rows_removed,
        rows = frame.height(),
        "Sanitized rows"
    );

    Ok(SanitizeOutcome {
        frame,
        comma_rows_removed,
        duplicate_rows_removed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TransformError;
    use crate::frame::text_column;

    fn col(name: &str, values: &[Option<&str>]) -> polars::prelude::Column {
        text_column(name, values.iter().map(|v| v.map(str::to_string)).collect())
    }

    fn frame() -> DataFrame {
        DataFrame::new(vec![
            col("OGP", &[Some(" Hand"), Some("Knee"), Some("*Thorax"), Some("Knee")]),
            col(
                "Clinical EXI",
                &[Some("(!) 310"), Some("250"), Some("1,2"), Some("250")],
            ),
            col(
                "SOP Instance UID",
                &[Some("1.1"), Some("1.2"), Some("1.3"), Some("1.2")],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_separator_rows_are_dropped() {
        let (df, removed) = drop_separator_rows(frame(), ',').unwrap();
        assert_eq!(removed, 1);
        assert_eq!(df.height(), 3);
    }

    #[test]
    fn test_duplicates_keep_first() {
        let (df, removed) = drop_duplicate_records(frame()).unwrap();
        assert_eq!(removed, 1);
        assert_eq!(
            text_values(&df, SOP_INSTANCE_UID).unwrap(),
            vec![
                Some("1.1".to_string()),
                Some("1.2".to_string()),
                Some("1.3".to_string())
            ]
        );
    }

    #[test]
    fn test_missing_uids_compare_equal() {
        let df = DataFrame::new(vec![col("SOP Instance UID", &[None, Some("9"), None])]).unwrap();
        let (df, removed) = drop_duplicate_records(df).unwrap();
        assert_eq!(removed, 1);
        assert_eq!(df.height(), 2);
    }

    #[test]
    fn test_label_junk_is_stripped_once_each() {
        let junk = [' ', ',', '*'];
        assert_eq!(strip_label(" ,*Hand", &junk), "Hand");
        assert_eq!(strip_label("  Hand", &junk), " Hand");
        assert_eq!(strip_label("* Hand", &junk), " Hand");
        assert_eq!(strip_label("**Hand", &junk), "*Hand");
        assert_eq!(strip_label("Hand", &junk), "Hand");
    }

    #[test]
    fn test_exi_marker_is_removed() {
        assert_eq!(strip_exi_marker("(!) 310", "(!) "), "310");
        assert_eq!(strip_exi_marker("(!)310", "(!) "), "(!)310");
        assert_eq!(strip_exi_marker("310 (!) ", "(!) "), "310 (!) ");
    }

    #[test]
    fn test_sanitize_counts_each_stage() {
        let outcome = sanitize(frame(), &CleaningOptions::default()).unwrap();
        assert_eq!(outcome.comma_rows_removed, 1);
        assert_eq!(outcome.duplicate_rows_removed, 1);
        assert_eq!(
            text_values(&outcome.frame, OGP).unwrap(),
            vec![Some("Hand".to_string()), Some("Knee".to_string())]
        );
        assert_eq!(
            text_values(&outcome.frame, CLINICAL_EXI).unwrap(),
            vec![Some("310".to_string()), Some("250".to_string())]
        );
    }

    #[test]
    fn test_sanitize_requires_uid() {
        let df = DataFrame::new(vec![col("OGP", &[Some("Hand")])]).unwrap();
        let err = sanitize(df, &CleaningOptions::default()).unwrap_err();
        assert!(matches!(err, TransformError::MissingColumn { .. }));
    }
}
