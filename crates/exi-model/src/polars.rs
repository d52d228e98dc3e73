//! Polars `AnyValue` utility functions.
//!
//! Every stage of the pipeline reads cells through these helpers so that text
//! and numeric columns are handled the same way regardless of dtype.

use polars::prelude::AnyValue;

/// Converts a Polars `AnyValue` to its text form.
///
/// Returns `None` for `Null`. Floats use [`format_float`], so a value read
/// back from a numeric column renders the way it was reported.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use exi_model::any_to_text;
///
/// assert_eq!(any_to_text(AnyValue::Null), None);
/// assert_eq!(any_to_text(AnyValue::Int32(70)), Some("70".to_string()));
/// assert_eq!(any_to_text(AnyValue::String("Thorax pa")), Some("Thorax pa".to_string()));
/// ```
pub fn any_to_text(value: AnyValue<'_>) -> Option<String> {
    let text = match value {
        AnyValue::Null => return None,
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_float(f64::from(v)),
        AnyValue::Float64(v) => format_float(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        other => {
            let s = other.to_string();
            if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
                s[1..s.len() - 1].to_string()
            } else {
                s
            }
        }
    };
    Some(text)
}

/// Converts an `AnyValue` to `f64`, returning `None` for null or non-numeric values.
pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int8(v) => Some(f64::from(v)),
        AnyValue::Int16(v) => Some(f64::from(v)),
        AnyValue::Int32(v) => Some(f64::from(v)),
        AnyValue::Int64(v) => Some(v as f64),
        AnyValue::UInt8(v) => Some(f64::from(v)),
        AnyValue::UInt16(v) => Some(f64::from(v)),
        AnyValue::UInt32(v) => Some(f64::from(v)),
        AnyValue::UInt64(v) => Some(v as f64),
        AnyValue::Float32(v) => Some(f64::from(v)),
        AnyValue::Float64(v) => Some(v),
        AnyValue::String(s) => parse_number(s),
        AnyValue::StringOwned(s) => parse_number(&s),
        _ => None,
    }
}

/// Parses a decimal number, ignoring surrounding whitespace.
///
/// Returns `None` for empty input and for anything `f64` cannot parse.
pub fn parse_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Formats a float the way spreadsheet tools expect in the report.
///
/// Integral values keep one decimal place so that medians are visibly
/// floating point (`90.0`, not `90`); other values use the shortest
/// representation that round-trips.
///
/// # Examples
///
/// ```
/// use exi_model::format_float;
///
/// assert_eq!(format_float(90.0), "90.0");
/// assert_eq!(format_float(12.5), "12.5");
/// assert_eq!(format_float(-0.25), "-0.25");
/// ```
pub fn format_float(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}
