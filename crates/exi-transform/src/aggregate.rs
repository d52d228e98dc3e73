//! Per-exam medians.

use std::collections::HashMap;

use polars::prelude::DataFrame;
use tracing::info;

use exi_model::{ExamSummary, Measure, OGP};

use crate::error::Result;
use crate::frame::{float_values, text_values};

/// Median of the non-null, non-NaN values.
///
/// Returns `None` when no such value exists. An even-sized sample yields the
/// mean of its two middle values.
///
/// ```
/// use exi_transform::median;
///
/// assert_eq!(median(&[Some(3.0), None, Some(1.0), Some(2.0)]), Some(2.0));
/// assert_eq!(median(&[Some(1.0), Some(4.0)]), Some(2.5));
/// assert_eq!(median(&[None, None]), None);
/// ```
pub fn median(values: &[Option<f64>]) -> Option<f64> {
    let mut present: Vec<f64> = values
        .iter()
        .flatten()
        .copied()
        .filter(|value| !value.is_nan())
        .collect();
    if present.is_empty() {
        return None;
    }
    present.sort_by(f64::total_cmp);
    let mid = present.len() / 2;
    if present.len().is_multiple_of(2) {
        Some((present[mid - 1] + present[mid]) / 2.0)
    } else {
        Some(present[mid])
    }
}

/// Row indices per exam label, in order of first appearance.
///
/// A missing label and an empty label are distinct keys.
fn group_rows(labels: Vec<Option<String>>) -> Vec<(Option<String>, Vec<usize>)> {
    let mut groups: Vec<(Option<String>, Vec<usize>)> = Vec::new();
    let mut index: HashMap<Option<String>, usize> = HashMap::new();
    for (row, label) in labels.into_iter().enumerate() {
        let slot = match index.get(&label) {
            Some(&slot) => slot,
            None => {
                index.insert(label.clone(), groups.len());
                groups.push((label, Vec::new()));
                groups.len() - 1
            }
        };
        groups[slot].1.push(row);
    }
    groups
}

/// Builds one [`ExamSummary`] per distinct `OGP` value.
///
/// Summaries come out in the order each label first appears. Rows without a
/// label form their own group, separate from rows whose label is empty.
pub fn aggregate(df: &DataFrame) -> Result<Vec<ExamSummary>> {
    let groups = group_rows(text_values(df, OGP)?);

    let mut columns = Vec::with_capacity(Measure::ALL.len());
    for measure in Measure::ALL {
        columns.push((measure, float_values(df, measure.column())?));
    }

    let summaries: Vec<ExamSummary> = groups
        .into_iter()
        .map(|(exam, rows)| {
            let n = rows.len();
            let summary = match exam {
                Some(exam) => ExamSummary::new(exam, n),
                None => ExamSummary::unlabelled(n),
            };
            columns
                .iter()
                .fold(summary, |summary, (measure, values)| {
                    let selected: Vec<Option<f64>> =
                        rows.iter().map(|&row| values[row]).collect();
                    summary.with_median(*measure, median(&selected))
                })
        })
        .collect();

    info!(exams = summaries.len(), rows = df.height(), "Aggregated exams");
    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{Column, IntoColumn, NamedFrom, Series};

    fn numbers(name: &str, values: &[Option<f64>]) -> Column {
        Series::new(name.into(), values.to_vec()).into_column()
    }

    fn frame(labels: &[Option<&str>], kv: &[Option<f64>], dose: &[Option<f64>]) -> DataFrame {
        let n = labels.len();
        let labels: Vec<Option<String>> = labels.iter().map(|v| v.map(str::to_string)).collect();
        let mut columns = vec![Series::new("OGP".into(), labels).into_column()];
        for measure in Measure::ALL {
            let column = match measure {
                Measure::Kv => numbers(measure.column(), kv),
                Measure::Dose => numbers(measure.column(), dose),
                _ => numbers(measure.column(), &vec![Some(1.0); n]),
            };
            columns.push(column);
        }
        DataFrame::new(columns).unwrap()
    }

    #[test]
    fn test_median_of_three() {
        let df = frame(
            &[Some("A"), Some("A"), Some("A")],
            &[Some(80.0), Some(100.0), Some(90.0)],
            &[None, None, None],
        );

        let summaries = aggregate(&df).unwrap();

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].exam.as_deref(), Some("A"));
        assert_eq!(summaries[0].n, 3);
        assert_eq!(summaries[0].median(Measure::Kv), Some(90.0));
    }

    #[test]
    fn test_all_missing_dose_is_null() {
        let df = frame(&[Some("B"), Some("B")], &[Some(70.0), Some(75.0)], &[None, None]);

        let summaries = aggregate(&df).unwrap();

        assert_eq!(summaries[0].median(Measure::Dose), None);
        assert_eq!(summaries[0].median(Measure::Kv), Some(72.5));
    }

    #[test]
    fn test_groups_follow_first_appearance() {
        let df = frame(
            &[Some("Knee"), Some("Hand"), None, Some("Knee")],
            &[Some(60.0), Some(50.0), Some(70.0), Some(64.0)],
            &[Some(1.0), None, None, Some(3.0)],
        );

        let summaries = aggregate(&df).unwrap();

        let labels: Vec<Option<&str>> = summaries.iter().map(|s| s.exam.as_deref()).collect();
        assert_eq!(labels, vec![Some("Knee"), Some("Hand"), None]);
        assert_eq!(summaries[0].n, 2);
        assert_eq!(summaries[0].median(Measure::Kv), Some(62.0));
        assert_eq!(summaries[0].median(Measure::Dose), Some(2.0));
        assert_eq!(summaries[2].n, 1);
    }

    #[test]
    fn test_missing_and_blank_labels_stay_apart() {
        let df = frame(
            &[None, Some(""), None],
            &[Some(50.0), Some(70.0), Some(54.0)],
            &[None, None, None],
        );

        let summaries = aggregate(&df).unwrap();

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].exam, None);
        assert_eq!(summaries[0].n, 2);
        assert_eq!(summaries[0].median(Measure::Kv), Some(52.0));
        assert_eq!(summaries[1].exam.as_deref(), Some(""));
        assert_eq!(summaries[1].n, 1);
    }

    #[test]
    fn test_median_ignores_nan() {
        assert_eq!(median(&[Some(f64::NAN), Some(4.0)]), Some(4.0));
        assert_eq!(median(&[]), None);
    }
}
