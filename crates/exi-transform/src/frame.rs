//! DataFrame access helpers shared by the stages.

use polars::prelude::{
    AnyValue, BooleanChunked, Column, DataFrame, IntoColumn, NamedFrom, NewChunkedArray, Series,
};

use exi_model::{any_to_f64, any_to_text};

use crate::error::{Result, TransformError};

pub(crate) fn require_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name).map_err(|_| TransformError::missing(name))
}

pub(crate) fn require_columns(df: &DataFrame, names: &[&str]) -> Result<()> {
    for name in names {
        require_column(df, name)?;
    }
    Ok(())
}

/// Cell values of `column` rendered as text; nulls stay `None`.
pub(crate) fn column_text(column: &Column) -> Vec<Option<String>> {
    (0..column.len())
        .map(|idx| any_to_text(column.get(idx).unwrap_or(AnyValue::Null)))
        .collect()
}

pub(crate) fn text_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    Ok(column_text(require_column(df, name)?))
}

pub(crate) fn float_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let column = require_column(df, name)?;
    Ok((0..column.len())
        .map(|idx| any_to_f64(column.get(idx).unwrap_or(AnyValue::Null)))
        .collect())
}

pub(crate) fn text_column(name: &str, values: Vec<Option<String>>) -> Column {
    Series::new(name.into(), values).into_column()
}

/// Replaces `name` in place, or appends it when absent.
pub(crate) fn set_text_column(
    df: &mut DataFrame,
    name: &str,
    values: Vec<Option<String>>,
) -> Result<()> {
    df.with_column(text_column(name, values))?;
    Ok(())
}

pub(crate) fn set_float_column(
    df: &mut DataFrame,
    name: &str,
    values: Vec<Option<f64>>,
) -> Result<()> {
    df.with_column(Series::new(name.into(), values))?;
    Ok(())
}

/// Keeps the rows whose flag is `true` and returns how many were removed.
pub(crate) fn keep_rows(df: DataFrame, keep: &[bool]) -> Result<(DataFrame, usize)> {
    let removed = keep.iter().filter(|&&flag| !flag).count();
    if removed == 0 {
        return Ok((df, 0));
    }
    let mask = BooleanChunked::from_slice("keep".into(), keep);
    Ok((df.filter(&mask)?, removed))
}
