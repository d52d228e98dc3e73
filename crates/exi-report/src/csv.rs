//! CSV rendering of the per-exam median report.
//!
//! The first column is an unnamed zero-based row index, followed by
//! [`REPORT_HEADER`]. Medians use [`format_float`] and missing medians are
//! written as empty fields.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use csv::{Terminator, WriterBuilder};
use tracing::info;

use exi_model::{ExamSummary, REPORT_HEADER, format_float};

use crate::common::ensure_parent_dir;

/// Writes the report to any writer.
pub fn write_summary<W: Write>(writer: W, summaries: &[ExamSummary]) -> Result<()> {
    let mut out = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    let mut header = Vec::with_capacity(REPORT_HEADER.len() + 1);
    header.push("");
    header.extend(REPORT_HEADER);
    out.write_record(&header).context("write report header")?;

    for (index, summary) in summaries.iter().enumerate() {
        out.write_record(summary_record(index, summary))
            .with_context(|| format!("write report row for {:?}", summary.exam))?;
    }
    out.flush().context("flush report")?;
    Ok(())
}

fn summary_record(index: usize, summary: &ExamSummary) -> Vec<String> {
    let mut record = Vec::with_capacity(REPORT_HEADER.len() + 1);
    record.push(index.to_string());
    record.push(summary.label().to_string());
    record.push(summary.n.to_string());
    record.extend(
        summary
            .medians()
            .map(|(_, value)| value.map(format_float).unwrap_or_default()),
    );
    record
}

/// Renders the report in memory.
pub fn summary_csv_string(summaries: &[ExamSummary]) -> Result<String> {
    let mut buffer = Vec::new();
    write_summary(&mut buffer, summaries)?;
    String::from_utf8(buffer).context("report is not valid UTF-8")
}

/// Writes the report to `path`, creating its parent directory if needed.
pub fn write_summary_csv(path: &Path, summaries: &[ExamSummary]) -> Result<()> {
    ensure_parent_dir(path)?;
    {
        let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
        write_summary(BufWriter::new(file), summaries)
            .with_context(|| format!("write {}", path.display()))?;
    }
    info!(path = %path.display(), exams = summaries.len(), "Wrote median report");
    Ok(())
}
