//! Header and value normalization.
//!
//! Different device models name the same measurement differently and export
//! numbers as text. These helpers map headers onto the canonical names in
//! `exi_model` and turn text cells into numbers.

pub mod columns;
pub mod numeric;

pub use columns::{canonical_column_name, normalize_columns};
pub use numeric::{coerce_lenient, coerce_strict};
