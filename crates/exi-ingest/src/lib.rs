//! Exposure-index log ingestion.
//!
//! This crate finds the CSV exports in a folder, decodes them without failing
//! on stray bytes, and concatenates them into one Polars `DataFrame` whose
//! columns are all nullable strings.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use exi_ingest::{IngestOptions, load_directory};
//!
//! let loaded = load_directory(Path::new("exports/2024"), &IngestOptions::default())?;
//! println!("{} rows from {} files", loaded.row_count(), loaded.sources.len());
//! ```

mod csv;
mod discovery;
mod error;
mod options;
mod table;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use self::csv::{
    DecodePolicy, DecodedText, RawTable, decode_bytes, parse_csv_text, read_csv_file,
};

// === File Discovery ===
pub use discovery::{CSV_SUFFIX, list_csv_files};

// === Options ===
pub use options::{DEFAULT_NA_VALUES, IngestOptions};

// === Unified Table ===
pub use table::{LoadedTable, SourceFile, UnifiedTable, load_directory};
