//! Directory allow-list module
//!
//! Decides whether a resolved filesystem path may be served. The check
//! is two-tier: files inside a subdirectory discovered under the root at
//! startup must match one of the configured allowed directories, while
//! loose files whose parent is not a tracked subdirectory are always
//! servable. An empty configuration disables the restriction entirely.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Read-only-after-construction allow-list over the served root.
pub struct AllowedDirs {
    allow_all: bool,
    /// Directories permitted to be served, as absolute-under-root paths.
    allowed: Vec<PathBuf>,
    /// All directories that physically exist under the root at startup.
    tracked: HashSet<PathBuf>,
}

impl AllowedDirs {
    /// Scan `root` and build the allow-list from configured directory names.
    ///
    /// An empty `allowed_dirs` list means no restriction. Otherwise every
    /// directory under the root is recorded so that later checks can tell
    /// tracked subdirectories apart from loose top-level files.
    pub fn build(root: &Path, allowed_dirs: &[String]) -> io::Result<Self> {
        if allowed_dirs.is_empty() {
            return Ok(Self {
                allow_all: true,
                allowed: Vec::new(),
                tracked: HashSet::new(),
            });
        }

        let mut tracked = HashSet::new();
        for entry in WalkDir::new(root).min_depth(1) {
            let entry = entry?;
            if entry.file_type().is_dir() {
                tracked.insert(entry.into_path());
            }
        }

        let allowed = allowed_dirs.iter().map(|dir| root.join(dir)).collect();

        Ok(Self {
            allow_all: false,
            allowed,
            tracked,
        })
    }

    /// Whether the file at `path` may be served.
    ///
    /// Pure predicate over the sets built at construction; the check runs
    /// only when a path is first populated into the cache, never on hits.
    pub fn is_allowed(&self, path: &Path) -> bool {
        if self.allow_all {
            return true;
        }

        // Files outside any tracked subdirectory (e.g. /robots.txt at the
        // top level) are not subject to the allow-list.
        let Some(parent) = path.parent() else {
            return true;
        };
        if !self.tracked.contains(parent) {
            return true;
        }

        self.allowed.iter().any(|dir| path.starts_with(dir))
    }
}
