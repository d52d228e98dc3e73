//! Cleaning options.

/// Characters and markers the sanitizer looks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleaningOptions {
    /// Rows with this character in any field are dropped.
    pub separator: char,
    /// Prefix removed once from the start of `Clinical EXI`.
    pub exi_marker: String,
    /// Leading characters removed from `OGP`, each at most once, in this order.
    pub ogp_junk: Vec<char>,
}

impl Default for CleaningOptions {
    fn default() -> Self {
        Self {
            separator: ',',
            exi_marker: "(!) ".to_string(),
            ogp_junk: vec![' ', ',', '*'],
        }
    }
}
