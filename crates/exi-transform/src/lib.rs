//! Cleaning and aggregation stages for EXI logs.
//!
//! Each stage takes ownership of the unified table and returns a new one, so
//! stages can be run and tested in isolation:
//!
//! 1. [`normalize_columns`] maps device-specific headers onto canonical names.
//! 2. [`sanitize`] drops comma-contaminated and duplicate rows and strips label prefixes.
//! 3. [`transform`] splits collimation, types the measurements and drops zero-DAP rows.
//! 4. [`aggregate`] computes per-exam medians.
//!
//! # Example
//!
//! ```ignore
//! use exi_transform::{CleaningOptions, aggregate, normalize_columns, sanitize, transform};
//!
//! let df = normalize_columns(loaded.frame)?;
//! let sanitized = sanitize(df, &CleaningOptions::default())?;
//! let typed = transform(sanitized.frame)?;
//! let summaries = aggregate(&typed.frame)?;
//! ```

mod aggregate;
mod error;
mod frame;
mod options;
mod sanitize;
mod schema;

pub mod normalization;

// Error type
pub use error::{Result, TransformError};

// Options
pub use options::CleaningOptions;

// Stages
pub use aggregate::{aggregate, median};
pub use normalization::{canonical_column_name, normalize_columns};
pub use sanitize::{
    SanitizeOutcome, drop_duplicate_records, drop_separator_rows, sanitize, strip_prefixes,
};
pub use schema::{
    SchemaOutcome, add_collimation_parts, coerce_measurements, drop_zero_dap, split_collimation,
    transform,
};
