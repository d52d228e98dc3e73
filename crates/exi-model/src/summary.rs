//! Per-exam summary rows.

use crate::columns::Measure;

/// Median statistics for one exam type (one distinct `OGP` value).
///
/// Created once by the aggregation stage and never modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ExamSummary {
    /// Exam label; `None` when the source rows had no `OGP` value.
    pub exam: Option<String>,
    /// Number of cleaned records carrying this label.
    pub n: usize,
    /// Medians in [`Measure::ALL`] order. `None` when every value was missing.
    medians: [Option<f64>; 8],
}

impl ExamSummary {
    /// Create a summary with no medians filled in.
    pub fn new(exam: impl Into<String>, n: usize) -> Self {
        Self::with_label(Some(exam.into()), n)
    }

    /// Summary for the rows that had no exam label at all.
    pub fn unlabelled(n: usize) -> Self {
        Self::with_label(None, n)
    }

    fn with_label(exam: Option<String>, n: usize) -> Self {
        Self {
            exam,
            n,
            medians: [None; 8],
        }
    }

    /// Label as written to the report. Missing labels are written empty.
    pub fn label(&self) -> &str {
        self.exam.as_deref().unwrap_or_default()
    }

    /// Builder-style setter used by the aggregator.
    #[must_use]
    pub fn with_median(mut self, measure: Measure, value: Option<f64>) -> Self {
        self.medians[Self::slot(measure)] = value;
        self
    }

    /// Median of `measure` across the exam's records.
    pub fn median(&self, measure: Measure) -> Option<f64> {
        self.medians[Self::slot(measure)]
    }

    /// All medians paired with their measure, in report order.
    pub fn medians(&self) -> impl Iterator<Item = (Measure, Option<f64>)> + '_ {
        Measure::ALL
            .iter()
            .map(move |&measure| (measure, self.median(measure)))
    }

    fn slot(measure: Measure) -> usize {
        Measure::ALL
            .iter()
            .position(|&m| m == measure)
            .unwrap_or_default()
    }
}
