//! Shared path utilities for report output.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Extension given to report files chosen without one.
pub const CSV_EXTENSION: &str = "csv";

/// Ensure a parent directory exists for a file path.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    Ok(())
}

/// Appends `.csv` when `path` has no extension. Other extensions are kept.
pub fn ensure_csv_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension(CSV_EXTENSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_csv_extension() {
        assert_eq!(
            ensure_csv_extension(PathBuf::from("out/medians")),
            PathBuf::from("out/medians.csv")
        );
        assert_eq!(
            ensure_csv_extension(PathBuf::from("medians.txt")),
            PathBuf::from("medians.txt")
        );
    }

    #[test]
    fn test_ensure_parent_dir_without_parent() {
        assert!(ensure_parent_dir(Path::new("medians.csv")).is_ok());
    }
}
