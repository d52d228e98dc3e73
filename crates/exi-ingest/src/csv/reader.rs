//! CSV parsing into raw string tables.

use std::collections::BTreeMap;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, warn};

use crate::error::{IngestError, Result};
use crate::options::IngestOptions;

use super::decode::decode_bytes;

/// One parsed export file, before it is merged with the others.
///
/// Every row has exactly `headers.len()` cells. Missing-value markers are
/// already `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table holds no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Normalizes one header row: trims names, names blank headers by position and
/// suffixes repeats with `.1`, `.2`, ...
fn normalize_headers<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: BTreeMap<String, usize> = BTreeMap::new();
    let mut headers = Vec::new();
    for (idx, value) in raw.enumerate() {
        let trimmed = value.trim();
        let base = if trimmed.is_empty() {
            format!("Unnamed: {idx}")
        } else {
            trimmed.to_string()
        };
        let count = seen.entry(base.clone()).or_insert(0);
        let name = if *count == 0 {
            base
        } else {
            format!("{base}.{count}")
        };
        *count += 1;
        headers.push(name);
    }
    headers
}

/// Parses decoded CSV text with a single header row.
///
/// Returns `Ok(None)` when the text has no header row at all. `source` is only
/// used for error and log messages.
pub fn parse_csv_text(
    text: &str,
    source: &Path,
    options: &IngestOptions,
) -> Result<Option<RawTable>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let header_record = reader.headers().map_err(|e| IngestError::CsvParse {
        path: source.to_path_buf(),
        message: e.to_string(),
    })?;
    if header_record.is_empty() || header_record.iter().all(|h| h.trim().is_empty()) {
        return Ok(None);
    }
    let headers = normalize_headers(header_record.iter());
    let width = headers.len();

    let mut rows = Vec::new();
    let mut overflowing = 0usize;
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|e| IngestError::CsvParse {
            path: source.to_path_buf(),
            message: format!("record {}: {e}", idx + 1),
        })?;
        if record.len() == 1 && record.get(0).is_some_and(str::is_empty) {
            continue;
        }
        let mut row: Vec<Option<String>> = (0..width)
            .map(|col| record.get(col).and_then(|value| options.cell_value(value)))
            .collect();
        if record.len() > width {
            overflowing += 1;
            row[width - 1] = Some(overflow_cell(&record, width - 1));
        }
        rows.push(row);
    }

    if overflowing > 0 {
        warn!(
            path = %source.display(),
            rows = overflowing,
            "Rows have more fields than the header; extra fields kept in the last column"
        );
    }

    Ok(Some(RawTable { headers, rows }))
}

/// Rejoins the fields from `start` onwards with the separator they were split on.
///
/// A row carrying an unquoted comma keeps the comma in its last cell, so the
/// separator filter sees and removes it instead of reading shifted values.
fn overflow_cell(record: &csv::StringRecord, start: usize) -> String {
    record.iter().skip(start).collect::<Vec<_>>().join(",")
}

/// Reads and parses one export file.
///
/// Returns `Ok(None)` for files with no header row (including zero-byte files).
pub fn read_csv_file(path: &Path, options: &IngestOptions) -> Result<Option<RawTable>> {
    let bytes = std::fs::read(path).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let decoded = decode_bytes(&bytes, options.decode_policy);
    if decoded.malformed > 0 {
        warn!(
            path = %path.display(),
            malformed = decoded.malformed,
            policy = ?options.decode_policy,
            "File contains bytes that are not valid UTF-8"
        );
    }
    let table = parse_csv_text(&decoded.text, path, options)?;
    if let Some(table) = &table {
        debug!(
            path = %path.display(),
            columns = table.headers.len(),
            rows = table.len(),
            "Parsed export file"
        );
    }
    Ok(table)
}
