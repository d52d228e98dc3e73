//! Canonical column names.

use polars::prelude::{Column, DataFrame};
use tracing::{debug, warn};

use exi_model::{CLINICAL_EXI, COLLIMATION, DAP, DOSE, KV, MAS, SID};

use crate::error::Result;
use crate::frame::{column_text, text_column};

/// Substring rules in priority order. The first rule whose needle occurs in a
/// header decides its canonical name.
const RULES: [(&str, &str); 7] = [
    ("kV", KV),
    ("mAs", MAS),
    ("DAP", DAP),
    ("Clin", CLINICAL_EXI),
    ("Collimation", COLLIMATION),
    ("SID", SID),
    ("Dose", DOSE),
];

/// Returns the canonical name for `header`, or `None` when it passes through.
///
/// ```
/// use exi_transform::normalization::canonical_column_name;
///
/// assert_eq!(canonical_column_name("DAP (cGy*cm2)"), Some("DAP"));
/// assert_eq!(canonical_column_name("Clin. EXI"), Some("Clinical EXI"));
/// assert_eq!(canonical_column_name("OGP"), None);
/// ```
pub fn canonical_column_name(header: &str) -> Option<&'static str> {
    RULES
        .iter()
        .find(|(needle, _)| header.contains(needle))
        .map(|(_, canonical)| *canonical)
}

/// Renames every column to its canonical name.
///
/// When several headers map to the same name the first column keeps its place
/// and its nulls are filled from the later ones, which are then dropped.
pub fn normalize_columns(df: DataFrame) -> Result<DataFrame> {
    let mut normalized: Vec<Column> = Vec::with_capacity(df.width());

    for mut column in df.take_columns() {
        let original = column.name().to_string();
        let target = canonical_column_name(&original).unwrap_or(original.as_str());

        if let Some(existing) = normalized
            .iter_mut()
            .find(|existing| existing.name().as_str() == target)
        {
            warn!(column = %original, into = target, "Merging duplicate column");
            *existing = coalesce(existing, &column, target);
            continue;
        }

        if target != original {
            debug!(from = %original, to = target, "Renamed column");
            column.rename(target.into());
        }
        normalized.push(column);
    }

    Ok(DataFrame::new(normalized)?)
}

fn coalesce(first: &Column, second: &Column, name: &str) -> Column {
    let filler = column_text(second);
    let merged = column_text(first)
        .into_iter()
        .zip(filler)
        .map(|(value, fill)| value.or(fill))
        .collect();
    text_column(name, merged)
}
