//! Utility modules.

/// Log sanitization helpers that keep secrets and large bodies out of logs.
pub mod log_sanitizer;
