//! Loader options.

use std::collections::BTreeSet;

use crate::csv::DecodePolicy;

/// Cell values read as missing.
///
/// These are the markers spreadsheet tools and the device software emit for
/// "no value". The empty string is always missing.
pub const DEFAULT_NA_VALUES: &[&str] = &[
    "",
    "#N/A",
    "#N/A N/A",
    "#NA",
    "-1.#IND",
    "-1.#QNAN",
    "-NaN",
    "-nan",
    "1.#IND",
    "1.#QNAN",
    "<NA>",
    "N/A",
    "NA",
    "NULL",
    "NaN",
    "None",
    "n/a",
    "nan",
    "null",
];

/// Options controlling how export files are read.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Handling of bytes that are not valid UTF-8.
    pub decode_policy: DecodePolicy,
    /// Exact cell values loaded as null.
    pub na_values: BTreeSet<String>,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            decode_policy: DecodePolicy::default(),
            na_values: DEFAULT_NA_VALUES.iter().map(|v| (*v).to_string()).collect(),
        }
    }
}

impl IngestOptions {
    /// Set the decode policy.
    #[must_use]
    pub fn with_decode_policy(mut self, policy: DecodePolicy) -> Self {
        self.decode_policy = policy;
        self
    }

    /// Converts a raw cell into a table value, mapping missing markers to `None`.
    pub fn cell_value(&self, raw: &str) -> Option<String> {
        if raw.is_empty() || self.na_values.contains(raw) {
            None
        } else {
            Some(raw.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_value() {
        let options = IngestOptions::default();
        assert_eq!(options.cell_value(""), None);
        assert_eq!(options.cell_value("NaN"), None);
        assert_eq!(options.cell_value(" "), Some(" ".to_string()));
        assert_eq!(options.cell_value("0"), Some("0".to_string()));
    }

    #[test]
    fn test_custom_na_values() {
        let mut options = IngestOptions::default();
        options.na_values.insert("---".to_string());
        assert_eq!(options.cell_value("---"), None);
    }
}
