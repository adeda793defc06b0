//! Ticker symbol helpers

/// Normalize a raw ticker as entered by a user
///
/// Surrounding whitespace is trimmed and the result upper-cased, so `" garan "`
/// and `"GARAN"` name the same stock. Returns `None` for blank input.
pub fn normalize_symbol(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_uppercase())
}
