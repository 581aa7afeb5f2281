//! Log sanitization utilities
//!
//! Keeps API keys, private keys and oversized response bodies (whole zones,
//! whole worksheets) out of debug/error logs.

/// Maximum number of bytes of a body included in log output.
const TRUNCATE_LIMIT: usize = 256;

/// Number of leading characters of a secret left visible by [`mask_secret`].
const SECRET_VISIBLE_PREFIX: usize = 4;

/// Largest char boundary `<= index`.
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    (0..=index).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0)
}

/// Truncate a string for safe logging.
///
/// Bodies within the limit are returned unchanged; longer ones keep their
/// first `TRUNCATE_LIMIT` bytes plus a note with the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Mask a credential for display, e.g. `"abcd****"`.
///
/// Secrets shorter than the visible prefix are masked completely.
pub fn mask_secret(secret: &str) -> String {
    if secret.chars().count() <= SECRET_VISIBLE_PREFIX {
        return "****".to_string();
    }
    let prefix: String = secret.chars().take(SECRET_VISIBLE_PREFIX).collect();
    format!("{prefix}****")
}
