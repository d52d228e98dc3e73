//! CSV reading utilities.

mod decode;
mod reader;

pub use decode::{DecodePolicy, DecodedText, decode_bytes};
pub use reader::{RawTable, parse_csv_text, read_csv_file};
