//! Request path canonicalization module
//!
//! Turns raw request paths into the normalized keys used to index the
//! file cache. Normalization never lets a path escape above the served
//! root, and the root path maps to the configured index document.

/// Resolves raw request paths to canonical cache keys.
pub struct PathResolver {
    index_path: String,
}

impl PathResolver {
    /// Create a resolver mapping `/` to the given index document.
    ///
    /// The index may be given with or without a leading slash
    /// (`index.html` and `/index.html` are equivalent).
    pub fn new(index: &str) -> Self {
        Self {
            index_path: clean(index),
        }
    }

    /// Canonical path of the index document (with leading slash).
    pub fn index_path(&self) -> &str {
        &self.index_path
    }

    /// Resolve a raw request path to its canonical cache key.
    ///
    /// The empty path and `/` both resolve to the index document, so the
    /// root and a direct index request share one cache entry.
    pub fn resolve(&self, raw: &str) -> String {
        let cleaned = clean(raw);
        if cleaned == "/" {
            self.index_path.clone()
        } else {
            cleaned
        }
    }
}

/// Normalize a path to a single-leading-slash, traversal-safe form.
///
/// Collapses repeated separators and `.` segments, resolves `..` without
/// ever climbing above the root, and strips any trailing slash.
pub fn clean(raw: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in raw.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }

    let mut cleaned = String::with_capacity(raw.len() + 1);
    cleaned.push('/');
    cleaned.push_str(&segments.join("/"));
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_passes_through_normal_paths() {
        assert_eq!(clean("/css/app.css"), "/css/app.css");
    }

    #[test]
    fn clean_adds_leading_slash() {
        assert_eq!(clean("css/app.css"), "/css/app.css");
    }

    #[test]
    fn clean_collapses_redundant_separators() {
        assert_eq!(clean("//css///app.css"), "/css/app.css");
        assert_eq!(clean("/css/./app.css"), "/css/app.css");
    }

    #[test]
    fn clean_strips_trailing_slash() {
        assert_eq!(clean("/css/"), "/css");
        assert_eq!(clean("/"), "/");
    }

    #[test]
    fn clean_never_escapes_root() {
        assert_eq!(clean("/../../etc/passwd"), "/etc/passwd");
        assert_eq!(clean("/css/../../../secret.txt"), "/secret.txt");
        assert_eq!(clean(".."), "/");
    }

    #[test]
    fn clean_resolves_parent_segments_in_place() {
        assert_eq!(clean("/css/sub/../app.css"), "/css/app.css");
    }

    #[test]
    fn resolve_maps_root_and_empty_to_index() {
        let resolver = PathResolver::new("index.html");
        assert_eq!(resolver.resolve("/"), "/index.html");
        assert_eq!(resolver.resolve(""), "/index.html");
    }

    #[test]
    fn resolve_direct_index_matches_root() {
        let resolver = PathResolver::new("index.html");
        assert_eq!(resolver.resolve("/index.html"), resolver.resolve("/"));
    }

    #[test]
    fn resolve_accepts_index_with_leading_slash() {
        let resolver = PathResolver::new("/index.html");
        assert_eq!(resolver.resolve("/"), "/index.html");
    }

    #[test]
    fn resolve_leaves_other_paths_alone() {
        let resolver = PathResolver::new("index.html");
        assert_eq!(resolver.resolve("/js/app.js"), "/js/app.js");
    }
}
