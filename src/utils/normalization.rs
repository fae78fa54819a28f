//! Key Normalization
//!
//! Categorical key attributes (gender, blood pressure level, diabetes type)
//! are compared case-insensitively. Both the stored tables and every lookup
//! input go through `normalize_key`, so the two sides can never disagree on
//! casing or stray padding.

/// Normalize a categorical key attribute: trim surrounding whitespace and
/// lowercase.
pub fn normalize_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Normalize a key in place, skipping the allocation when it is already
/// normalized.
pub fn normalize_key_in_place(value: &mut String) {
    let already_normal = value.trim().len() == value.len()
        && !value.chars().any(char::is_uppercase);

    if !already_normal {
        *value = normalize_key(value);
    }
}
