//! Normalization applied to form text before validation

/// Trim and collapse inner runs of whitespace to a single space
pub fn normalize_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
