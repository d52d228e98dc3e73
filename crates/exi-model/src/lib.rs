//! Data model types for exposure-index (EXI) log analysis.
//!
//! Radiography equipment exports one row per exposure. After loading, every
//! exposure lives as a row of a Polars `DataFrame`; this crate names the
//! columns the pipeline relies on and defines the per-exam summary that the
//! aggregation stage produces.
//!
//! # Module Organization
//!
//! - [`columns`]: Canonical column names and the measured fields
//! - [`summary`]: Per-exam median summaries
//! - [`polars`]: Polars `AnyValue` utility functions

pub mod columns;
pub mod polars;
pub mod summary;

pub use columns::{
    CLINICAL_EXI, COLLIMATION, COLLIMATION_1, COLLIMATION_2, DAP, DOSE, KV, MAS, Measure, OGP,
    REPORT_HEADER, SID, SOP_INSTANCE_UID,
};
pub use self::polars::{any_to_f64, any_to_text, format_float, parse_number};
pub use summary::ExamSummary;
