//! Content type detection module
//!
//! Extension-based lookup first, byte sniffing as the fallback for files
//! whose extension is unknown or missing.

use std::path::Path;

/// Look up a Content-Type from a file extension
///
/// Returns `None` for unknown extensions so callers can fall back to
/// content sniffing.
///
/// # Examples
/// ```
/// use memstatic::http::mime::from_extension;
/// assert_eq!(from_extension(Some("html")), Some("text/html; charset=utf-8"));
/// assert_eq!(from_extension(Some("xyz")), None);
/// ```
pub fn from_extension(extension: Option<&str>) -> Option<&'static str> {
    match extension {
        // Text
        Some("html" | "htm") => Some("text/html; charset=utf-8"),
        Some("css") => Some("text/css"),
        Some("txt" | "md") => Some("text/plain; charset=utf-8"),
        Some("xml") => Some("application/xml"),
        Some("csv") => Some("text/csv"),

        // JavaScript/WASM
        Some("js" | "mjs") => Some("application/javascript"),
        Some("json" | "map") => Some("application/json"),
        Some("wasm") => Some("application/wasm"),

        // Images
        Some("png") => Some("image/png"),
        Some("jpg" | "jpeg") => Some("image/jpeg"),
        Some("gif") => Some("image/gif"),
        Some("svg") => Some("image/svg+xml"),
        Some("ico") => Some("image/x-icon"),
        Some("webp") => Some("image/webp"),
        Some("avif") => Some("image/avif"),

        // Audio/Video
        Some("mp4") => Some("video/mp4"),
        Some("webm") => Some("video/webm"),
        Some("ogg" | "ogv") => Some("video/ogg"),
        Some("mp3") => Some("audio/mpeg"),
        Some("wav") => Some("audio/wav"),
        Some("flac") => Some("audio/flac"),

        // Fonts
        Some("woff") => Some("font/woff"),
        Some("woff2") => Some("font/woff2"),
        Some("ttf") => Some("font/ttf"),
        Some("otf") => Some("font/otf"),

        // Documents/Archives
        Some("pdf") => Some("application/pdf"),
        Some("zip") => Some("application/zip"),
        Some("gz" | "gzip") => Some("application/gzip"),
        Some("tar") => Some("application/x-tar"),

        _ => None,
    }
}

/// Sniff a Content-Type from the leading bytes of a file
///
/// Covers the signatures this server is likely to meet: common image,
/// document and archive magics, an HTML prefix check, and a printable-text
/// heuristic. Unrecognizable binary data yields `application/octet-stream`.
pub fn sniff(data: &[u8]) -> &'static str {
    if let Some(ctype) = sniff_magic(data) {
        return ctype;
    }

    // HTML before the generic text check so index documents without an
    // extension still render.
    let trimmed = skip_leading_whitespace(data);
    if starts_with_ignore_case(trimmed, b"<!doctype html")
        || starts_with_ignore_case(trimmed, b"<html")
        || starts_with_ignore_case(trimmed, b"<head")
        || starts_with_ignore_case(trimmed, b"<body")
    {
        return "text/html; charset=utf-8";
    }

    if looks_like_text(data) {
        return "text/plain; charset=utf-8";
    }

    "application/octet-stream"
}

/// Resolve the Content-Type for a file: extension table, else sniffing
pub fn content_type_for(path: &Path, data: &[u8]) -> &'static str {
    let extension = path.extension().and_then(|e| e.to_str());
    from_extension(extension).unwrap_or_else(|| sniff(data))
}

/// Exact-prefix magic numbers
fn sniff_magic(data: &[u8]) -> Option<&'static str> {
    const MAGICS: &[(&[u8], &str)] = &[
        (b"\x89PNG\r\n\x1a\n", "image/png"),
        (b"\xff\xd8\xff", "image/jpeg"),
        (b"GIF87a", "image/gif"),
        (b"GIF89a", "image/gif"),
        (b"%PDF-", "application/pdf"),
        (b"PK\x03\x04", "application/zip"),
        (b"\x1f\x8b", "application/gzip"),
        (b"\x00asm", "application/wasm"),
    ];

    MAGICS
        .iter()
        .find(|(magic, _)| data.starts_with(magic))
        .map(|&(_, ctype)| ctype)
}

fn skip_leading_whitespace(data: &[u8]) -> &[u8] {
    let start = data
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(data.len());
    &data[start..]
}

fn starts_with_ignore_case(data: &[u8], prefix: &[u8]) -> bool {
    data.len() >= prefix.len()
        && data
            .iter()
            .zip(prefix)
            .all(|(a, b)| a.eq_ignore_ascii_case(b))
}

/// Printable-text heuristic over the first KiB: valid UTF-8 with no control
/// bytes other than whitespace
fn looks_like_text(data: &[u8]) -> bool {
    let sample = &data[..data.len().min(1024)];
    match std::str::from_utf8(sample) {
        Ok(s) => !s
            .bytes()
            .any(|b| b.is_ascii_control() && !b.is_ascii_whitespace()),
        // A multi-byte sequence may be cut at the sample boundary; only the
        // complete prefix matters.
        Err(e) if e.error_len().is_none() => {
            let valid = &sample[..e.valid_up_to()];
            !valid
                .iter()
                .any(|b| b.is_ascii_control() && !b.is_ascii_whitespace())
        }
        Err(_) => false,
    }
}
