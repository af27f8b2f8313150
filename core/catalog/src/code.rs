//! Product code detection for search input

use std::sync::LazyLock;

use regex::Regex;

/// Anything that cannot appear in an ISBN or UPC.
static NON_CODE_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)[^0-9X]").unwrap());

/// Kind of product code a search input looks like
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeType {
    Isbn,
    Upc,
    Unknown,
}

impl CodeType {
    /// Classify raw input by the length of its cleaned form.
    ///
    /// 10 or 13 characters is an ISBN, 12 is a UPC.
    pub fn detect(input: &str) -> Self {
        match clean_code(input).len() {
            10 | 13 => Self::Isbn,
            12 => Self::Upc,
            _ => Self::Unknown,
        }
    }
}

/// Strip separators and other noise from a typed or scanned code.
///
/// Keeps ASCII digits and the ISBN-10 check character `X` (upper-cased).
pub fn clean_code(input: &str) -> String {
    NON_CODE_CHARS.replace_all(input, "").to_ascii_uppercase()
}
