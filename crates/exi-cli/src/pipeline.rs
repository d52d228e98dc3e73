//! EXI analysis pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Ingest**: Discover and concatenate the CSV exports in the input folder
//! 2. **Clean**: Normalize headers, drop bad rows, type the measurements
//! 3. **Aggregate**: Compute per-exam medians
//! 4. **Output**: Write the median report
//!
//! Each stage takes the output of the previous stage and returns typed results.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::{info, info_span, warn};

use exi_ingest::{IngestError, IngestOptions, LoadedTable, load_directory};
use exi_model::ExamSummary;
use exi_report::write_summary_csv;
use exi_transform::{CleaningOptions, normalize_columns, sanitize, transform};

use crate::types::{Analysis, PipelineOptions, PipelineResult, RunConfig, StageCounts};

// ============================================================================
// Stage 1: Ingest
// ============================================================================

/// Load every export in `input_dir` into one table.
pub fn ingest(input_dir: &Path, options: &IngestOptions) -> Result<LoadedTable> {
    info_span!("ingest", dir = %input_dir.display()).in_scope(|| -> Result<_> {
        let start = Instant::now();
        let loaded = load_directory(input_dir, options)
            .with_context(|| format!("load exports from {}", input_dir.display()))?;
        info!(
            files = loaded.sources.len(),
            rows = loaded.row_count(),
            duration_ms = start.elapsed().as_millis(),
            "ingest complete"
        );
        Ok(loaded)
    })
}

/// True when `error` was caused by a missing input folder.
pub fn is_missing_input(error: &anyhow::Error) -> bool {
    error.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<IngestError>(),
            Some(IngestError::DirectoryNotFound { .. })
        )
    })
}

// ============================================================================
// Stage 2: Clean
// ============================================================================

/// Result of the clean stage.
#[derive(Debug)]
pub struct CleanResult {
    pub frame: DataFrame,
    pub comma_rows_removed: usize,
    pub duplicate_rows_removed: usize,
    pub zero_dap_rows_removed: usize,
    pub malformed_collimation: usize,
}

/// Normalize headers, sanitize rows and type the measurement columns.
pub fn clean(df: DataFrame, options: &CleaningOptions) -> Result<CleanResult> {
    let df = info_span!("normalize")
        .in_scope(|| normalize_columns(df))
        .context("normalize column names")?;

    let sanitized = info_span!("sanitize")
        .in_scope(|| sanitize(df, options))
        .context("sanitize rows")?;

    let typed = info_span!("schema")
        .in_scope(|| transform(sanitized.frame))
        .context("convert measurement columns")?;

    Ok(CleanResult {
        frame: typed.frame,
        comma_rows_removed: sanitized.comma_rows_removed,
        duplicate_rows_removed: sanitized.duplicate_rows_removed,
        zero_dap_rows_removed: typed.zero_dap_rows_removed,
        malformed_collimation: typed.malformed_collimation,
    })
}

// ============================================================================
// Stage 3: Aggregate
// ============================================================================

pub fn aggregate(df: &DataFrame) -> Result<Vec<ExamSummary>> {
    info_span!("aggregate")
        .in_scope(|| exi_transform::aggregate(df))
        .context("compute exam medians")
}

/// Run ingest, clean and aggregate on `input_dir`.
///
/// A folder with no columns at all (no exports, or only empty ones) yields an
/// empty analysis instead of a missing-column error.
pub fn analyse(input_dir: &Path, options: &PipelineOptions) -> Result<Analysis> {
    let loaded = ingest(input_dir, &options.ingest)?;
    let mut counts = StageCounts {
        files_read: loaded.sources.len(),
        rows_loaded: loaded.row_count(),
        ..StageCounts::default()
    };

    if loaded.frame.width() == 0 {
        warn!(dir = %input_dir.display(), "No export data found; report will be empty");
        return Ok(Analysis {
            input_dir: input_dir.to_path_buf(),
            sources: loaded.sources,
            counts,
            summaries: Vec::new(),
        });
    }

    let cleaned = clean(loaded.frame, &options.cleaning)?;
    counts.comma_rows_removed = cleaned.comma_rows_removed;
    counts.duplicate_rows_removed = cleaned.duplicate_rows_removed;
    counts.zero_dap_rows_removed = cleaned.zero_dap_rows_removed;
    counts.malformed_collimation = cleaned.malformed_collimation;
    counts.rows_kept = cleaned.frame.height();

    let summaries = aggregate(&cleaned.frame)?;

    Ok(Analysis {
        input_dir: input_dir.to_path_buf(),
        sources: loaded.sources,
        counts,
        summaries,
    })
}

// ============================================================================
// Stage 4: Output
// ============================================================================

/// Write the median report for `analysis` to `output_file`.
pub fn output(analysis: Analysis, output_file: PathBuf) -> Result<PipelineResult> {
    let span = info_span!("report", path = %output_file.display());
    span.in_scope(|| -> Result<_> {
        let start = Instant::now();
        write_summary_csv(&output_file, &analysis.summaries)?;
        info!(
            exams = analysis.summaries.len(),
            duration_ms = start.elapsed().as_millis(),
            "output complete"
        );
        Ok(PipelineResult {
            analysis,
            output_file,
        })
    })
}

/// Run every stage for a fully resolved configuration.
pub fn run_pipeline(config: &RunConfig, options: &PipelineOptions) -> Result<PipelineResult> {
    let analysis = analyse(&config.input_dir, options)?;
    output(analysis, config.output_file.clone())
}
