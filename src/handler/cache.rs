//! In-memory file cache module
//!
//! The concurrent map from canonical request path to cached file bytes
//! and metadata, plus the companion set of paths confirmed absent. Both
//! structures only ever grow: entries live until process teardown, and a
//! path recorded missing stays missing even if the file appears later.

use crate::http::{etag, mime};
use crate::logger;
use hyper::body::Bytes;
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::Path;
use std::sync::{Arc, RwLock};
use std::time::SystemTime;
use thiserror::Error;

/// Immutable cached copy of one on-disk file.
#[derive(Debug)]
pub struct CachedFile {
    /// File contents.
    pub data: Bytes,
    /// Resolved content type (extension table, else sniffed).
    pub content_type: &'static str,
    /// Size in bytes, from file metadata.
    pub size: u64,
    /// Last-modified timestamp, from file metadata.
    pub modified: SystemTime,
    /// Strong validator over the contents.
    pub etag: String,
}

/// Errors from populating the cache for a path.
#[derive(Debug, Error)]
pub enum PopulateError {
    /// The file does not exist. The only outcome recorded permanently.
    #[error("file not found")]
    NotFound,
    /// The file exists but could not be read.
    #[error("failed to read file: {0}")]
    Io(#[source] io::Error),
    /// Contents were read but metadata retrieval failed.
    #[error("failed to read file metadata: {0}")]
    Metadata(#[source] io::Error),
}

/// Concurrent path-to-entry map with lazy population and no eviction.
pub struct FileCache {
    entries: RwLock<HashMap<String, Arc<CachedFile>>>,
}

impl FileCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Look up the cached entry for a canonical path.
    ///
    /// Takes the shared lock only; entries are inserted whole, so a
    /// reader never observes a partially written entry.
    pub fn lookup(&self, path: &str) -> Option<Arc<CachedFile>> {
        self.entries.read().unwrap().get(path).cloned()
    }

    /// Read `file` from disk and insert its entry under `path`.
    ///
    /// The disk read happens without the lock held; only the final insert
    /// takes the exclusive lock, so slow I/O never blocks unrelated
    /// lookups. Two requests may race here on the first access to a
    /// path. Both read the same file and the later insert replaces the
    /// earlier with an identical entry, which is accepted rather than
    /// serialized through a single-flight guard.
    pub async fn populate(
        &self,
        path: &str,
        file: &Path,
    ) -> Result<Arc<CachedFile>, PopulateError> {
        let data = match tokio::fs::read(file).await {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(PopulateError::NotFound),
            Err(e) => return Err(PopulateError::Io(e)),
        };

        let metadata = tokio::fs::metadata(file)
            .await
            .map_err(PopulateError::Metadata)?;
        let modified = metadata.modified().map_err(PopulateError::Metadata)?;

        let content_type = mime::content_type_for(file, &data);
        let entry = Arc::new(CachedFile {
            etag: etag::generate(&data),
            data: Bytes::from(data),
            content_type,
            size: metadata.len(),
            modified,
        });

        self.entries
            .write()
            .unwrap()
            .insert(path.to_string(), Arc::clone(&entry));
        logger::log_cache_store(path, entry.data.len());

        Ok(entry)
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for FileCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Concurrent set of canonical paths confirmed absent.
///
/// Membership is permanent for the process lifetime. A racing duplicate
/// disk check before the record lands is harmless since the answer is
/// the same either way.
pub struct NegativeCache {
    paths: RwLock<HashSet<String>>,
}

impl NegativeCache {
    pub fn new() -> Self {
        Self {
            paths: RwLock::new(HashSet::new()),
        }
    }

    /// Permanently record `path` as absent.
    pub fn record(&self, path: &str) {
        let inserted = self.paths.write().unwrap().insert(path.to_string());
        if inserted {
            logger::log_cache_negative(path);
        }
    }

    /// Whether `path` has been recorded absent.
    pub fn contains(&self, path: &str) -> bool {
        self.paths.read().unwrap().contains(path)
    }
}

impl Default for NegativeCache {
    fn default() -> Self {
        Self::new()
    }
}
