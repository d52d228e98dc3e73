//! Concatenation of export files into one unified table.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use tracing::{info, warn};

use crate::csv::{RawTable, read_csv_file};
use crate::discovery::list_csv_files;
use crate::error::Result;
use crate::options::IngestOptions;

/// Column-wise union of several raw tables.
///
/// Columns appear in the order their header is first seen. Rows from a table
/// that lacks a column get `None` in it.
#[derive(Debug, Default)]
pub struct UnifiedTable {
    names: Vec<String>,
    positions: HashMap<String, usize>,
    cells: Vec<Vec<Option<String>>>,
    height: usize,
}

impl UnifiedTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows appended so far.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Column names in first-seen order.
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Appends all rows of `table`, adding any columns not seen before.
    pub fn append(&mut self, table: RawTable) {
        let RawTable { headers, rows } = table;
        let added = rows.len();

        let targets: Vec<usize> = headers
            .into_iter()
            .map(|name| self.column_index(name))
            .collect();

        let mut filled = vec![false; self.names.len()];
        for (source_idx, &target) in targets.iter().enumerate() {
            filled[target] = true;
            let column = &mut self.cells[target];
            column.reserve(added);
            for row in &rows {
                column.push(row.get(source_idx).cloned().flatten());
            }
        }
        for (target, was_filled) in filled.into_iter().enumerate() {
            if !was_filled {
                self.cells[target].extend(std::iter::repeat_n(None, added));
            }
        }
        self.height += added;
    }

    fn column_index(&mut self, name: String) -> usize {
        if let Some(&idx) = self.positions.get(&name) {
            return idx;
        }
        let idx = self.names.len();
        self.positions.insert(name.clone(), idx);
        self.names.push(name);
        self.cells.push(vec![None; self.height]);
        idx
    }

    /// Builds a DataFrame with one nullable string column per header.
    pub fn into_dataframe(self) -> Result<DataFrame> {
        let columns: Vec<Column> = self
            .names
            .into_iter()
            .zip(self.cells)
            .map(|(name, values)| Series::new(name.as_str().into(), values).into_column())
            .collect();
        Ok(DataFrame::new(columns)?)
    }
}

/// A file that contributed rows to the unified table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub rows: usize,
}

/// Output of [`load_directory`].
#[derive(Debug, Clone)]
pub struct LoadedTable {
    /// All rows from all files; every column is a nullable string column.
    pub frame: DataFrame,
    /// Files that were read, in load order.
    pub sources: Vec<SourceFile>,
}

impl LoadedTable {
    /// Total number of loaded rows.
    pub fn row_count(&self) -> usize {
        self.frame.height()
    }
}

/// Loads every CSV export in `dir` into a single table.
///
/// # Errors
///
/// Returns [`IngestError::DirectoryNotFound`](crate::IngestError::DirectoryNotFound)
/// when `dir` is missing, and propagates read or parse failures of individual
/// files. Files without a header row are skipped with a warning.
pub fn load_directory(dir: &Path, options: &IngestOptions) -> Result<LoadedTable> {
    let files = list_csv_files(dir)?;
    let mut unified = UnifiedTable::new();
    let mut sources = Vec::with_capacity(files.len());

    for path in files {
        let Some(table) = read_csv_file(&path, options)? else {
            warn!(path = %path.display(), "Skipping file without a header row");
            continue;
        };
        let rows = table.len();
        unified.append(table);
        sources.push(SourceFile { path, rows });
    }

    info!(
        dir = %dir.display(),
        files = sources.len(),
        rows = unified.height(),
        columns = unified.column_names().len(),
        "Loaded export folder"
    );

    Ok(LoadedTable {
        frame: unified.into_dataframe()?,
        sources,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(headers: &[&str], rows: &[&[Option<&str>]]) -> RawTable {
        RawTable {
            headers: headers.iter().map(|h| (*h).to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|v| v.map(str::to_string)).collect())
                .collect(),
        }
    }

    #[test]
    fn test_append_unions_columns_in_first_seen_order() {
        let mut table = UnifiedTable::new();
        table.append(raw(&["OGP", "kV"], &[&[Some("Hand"), Some("52")]]));
        table.append(raw(
            &["kV", "DAP"],
            &[&[Some("70"), Some("1.2")], &[Some("81"), None]],
        ));

        assert_eq!(table.column_names(), &["OGP", "kV", "DAP"]);
        assert_eq!(table.height(), 3);

        let df = table.into_dataframe().unwrap();
        assert_eq!(df.height(), 3);
        let ogp = df.column("OGP").unwrap();
        assert_eq!(ogp.null_count(), 2);
        let dap = df.column("DAP").unwrap();
        assert_eq!(dap.null_count(), 2);
    }

    #[test]
    fn test_empty_table_builds_empty_frame() {
        let df = UnifiedTable::new().into_dataframe().unwrap();
        assert_eq!(df.width(), 0);
        assert_eq!(df.height(), 0);
    }
}
