//! `ETag` support for conditional requests
//!
//! Entries cache their tag at creation time, so generation runs once per
//! file for the process lifetime.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Generate a quoted `ETag` from file content, e.g. `"abc123def"`
pub fn generate(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    let v = hasher.finish();
    format!("\"{v:x}\"")
}

/// Check a client's `If-None-Match` header against the server's `ETag`
///
/// Handles single tags, comma-separated lists and the `*` wildcard.
/// Returns true when the client's copy is current (respond 304).
pub fn matches(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|client_etag| {
        client_etag
            .split(',')
            .any(|e| e.trim() == etag || e.trim() == "*")
    })
}
