//! Key canonicalization
//!
//! Raw document keys and declared field names are both reduced to the same
//! canonical form before they are compared, so a field declared as
//! `_fooBar` matches a schema entry `foobar`.

/// Delimiter the document store uses to join nested paths
pub const DEFAULT_DELIMITER: char = '_';

/// Canonicalize a key using the default delimiter
pub fn normalize_key(raw: &str) -> String {
    normalize_key_with(raw, DEFAULT_DELIMITER)
}

/// Canonicalize a key: lowercase it, collapse runs of the delimiter and
/// trim the delimiter from both ends.
///
/// Lowercasing happens first so the result is stable under repeated
/// application.
pub fn normalize_key_with(raw: &str, delimiter: char) -> String {
    let lowered = raw.to_lowercase();
    let mut normalized = String::with_capacity(lowered.len());

    for segment in lowered.split(delimiter).filter(|s| !s.is_empty()) {
        if !normalized.is_empty() {
            normalized.push(delimiter);
        }
        normalized.push_str(segment);
    }

    normalized
}

/// First delimiter-separated segment of a canonical key
pub fn base_key(normalized: &str, delimiter: char) -> &str {
    normalized.split(delimiter).next().unwrap_or(normalized)
}
