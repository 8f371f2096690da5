//! Not-found collaborator module
//!
//! Unresolved paths are delegated to a pluggable collaborator, so a
//! deployment can answer with a plain 404 or serve the index document
//! for every unknown path the way single-page applications expect.

use crate::handler::cache::CachedFile;
use crate::http;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::sync::Arc;

/// Collaborator invoked for paths that resolve to no cached file.
pub trait NotFoundHandler: Send + Sync {
    fn respond(&self, path: &str, is_head: bool) -> Response<Full<Bytes>>;
}

/// Plain 404 responder, the default collaborator.
pub struct DefaultNotFound;

impl NotFoundHandler for DefaultNotFound {
    fn respond(&self, _path: &str, is_head: bool) -> Response<Full<Bytes>> {
        let resp = http::build_404_response();
        if !is_head {
            return resp;
        }
        let (parts, _) = resp.into_parts();
        Response::from_parts(parts, Full::new(Bytes::new()))
    }
}

/// Serves the index document for every unresolved path.
///
/// Holds the entry loaded at construction, so fallback responses never
/// touch the filesystem.
pub struct IndexFallback {
    index: Arc<CachedFile>,
}

impl IndexFallback {
    pub fn new(index: Arc<CachedFile>) -> Self {
        Self { index }
    }
}

impl NotFoundHandler for IndexFallback {
    fn respond(&self, _path: &str, is_head: bool) -> Response<Full<Bytes>> {
        http::build_file_response(
            self.index.data.clone(),
            self.index.content_type,
            &self.index.etag,
            &http::http_date(self.index.modified),
            is_head,
        )
    }
}
