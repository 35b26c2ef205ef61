//! Splitting free-text field values into comparable tokens.

use std::collections::BTreeSet;

use mrec_model::CellValue;

/// Unordered set of non-empty tokens taken from one field value.
pub type TokenSet = BTreeSet<String>;

/// Separators used in list-valued fields such as cast or director columns.
///
/// Whitespace of any kind also separates tokens.
pub const DELIMITERS: &[char] = &['/', '／', ',', '，', ';', '；', '|'];

fn is_delimiter(ch: char) -> bool {
    ch.is_whitespace() || DELIMITERS.contains(&ch)
}

/// Tokenizes a cell; missing cells yield the empty set.
pub fn tokenize(value: &CellValue) -> TokenSet {
    tokenize_str(&value.to_text())
}

pub fn tokenize_str(raw: &str) -> TokenSet {
    raw.trim()
        .split(is_delimiter)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
