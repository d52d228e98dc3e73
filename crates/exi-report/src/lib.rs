//! Report output for EXI analysis.
//!
//! The median table is written as CSV with an unnamed leading index column.

pub mod common;
pub mod csv;

pub use common::{CSV_EXTENSION, ensure_csv_extension, ensure_parent_dir};
pub use self::csv::{summary_csv_string, write_summary, write_summary_csv};
