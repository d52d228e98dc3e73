use std::path::PathBuf;

use exi_ingest::{IngestOptions, SourceFile};
use exi_model::ExamSummary;
use exi_transform::CleaningOptions;

/// Input folder and report destination for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub input_dir: PathBuf,
    pub output_file: PathBuf,
}

/// Options passed through to the loader and the cleaning stages.
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    pub ingest: IngestOptions,
    pub cleaning: CleaningOptions,
}

/// Row counts reported by each stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageCounts {
    pub files_read: usize,
    pub rows_loaded: usize,
    pub comma_rows_removed: usize,
    pub duplicate_rows_removed: usize,
    pub zero_dap_rows_removed: usize,
    pub malformed_collimation: usize,
    pub rows_kept: usize,
}

/// Everything computed from an input folder before the report is written.
#[derive(Debug)]
pub struct Analysis {
    pub input_dir: PathBuf,
    pub sources: Vec<SourceFile>,
    pub counts: StageCounts,
    pub summaries: Vec<ExamSummary>,
}

#[derive(Debug)]
pub struct PipelineResult {
    pub analysis: Analysis,
    pub output_file: PathBuf,
}
