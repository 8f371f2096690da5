//! Static file server module
//!
//! The per-request dispatcher over the in-memory caches. Every request
//! runs the same path: validate the method, resolve the canonical key,
//! serve from cache, or populate the cache on a first miss with the
//! directory allow-list enforced. Unknown paths go to the not-found
//! collaborator, and push-capable connections are offered the assets
//! declared for the served path.

use crate::handler::allow::AllowedDirs;
use crate::handler::cache::{CachedFile, FileCache, NegativeCache, PopulateError};
use crate::handler::not_found::{DefaultNotFound, IndexFallback, NotFoundHandler};
use crate::handler::path::{self, PathResolver};
use crate::handler::push::{PushRegistry, ResponsePusher};
use crate::http::{self, etag, RangeOutcome};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Options for building a static file server.
pub struct ServerOptions {
    /// Filesystem root to serve. Empty means the current directory.
    pub root_dir: String,
    /// Index document relative to the root, served for `/`.
    pub index: String,
    /// Prefix applied to push target URLs.
    pub url_path_prefix: String,
    /// Directories under the root allowed to be served. Empty allows all.
    pub allowed_dirs: Vec<String>,
    /// Serve the index document for unknown paths instead of a plain 404.
    pub spa_fallback: bool,
    /// Trigger path mapped to the assets pushed when it is served.
    pub push_content: HashMap<String, Vec<String>>,
    /// Custom collaborator for unresolved paths. Takes precedence over
    /// `spa_fallback` when set.
    pub not_found: Option<Box<dyn NotFoundHandler>>,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            root_dir: ".".to_string(),
            index: "index.html".to_string(),
            url_path_prefix: String::new(),
            allowed_dirs: Vec::new(),
            spa_fallback: false,
            push_content: HashMap::new(),
            not_found: None,
        }
    }
}

/// Errors from building a static file server.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to scan root directory: {0}")]
    RootScan(#[source] std::io::Error),
    #[error("push target {0} is not in an allowed directory")]
    PushTargetDenied(String),
    #[error("failed to preload push target {target}: {source}")]
    PushPreload {
        target: String,
        source: PopulateError,
    },
    #[error("failed to load index document for fallback: {0}")]
    IndexPreload(#[source] PopulateError),
}

/// Memory-caching static file server.
///
/// Shared across request tasks behind an `Arc`; all mutable state lives
/// in the two internal caches.
pub struct StaticFileServer {
    root_dir: PathBuf,
    resolver: PathResolver,
    allowed: AllowedDirs,
    cache: FileCache,
    negative: NegativeCache,
    push: PushRegistry,
    not_found: Box<dyn NotFoundHandler>,
}

impl StaticFileServer {
    /// Build the server: scan the root for the allow-list, preload every
    /// declared push target, and set up the not-found collaborator.
    ///
    /// Preloading at construction means a push offer never races with
    /// cache population, and a misconfigured push rule fails fast
    /// instead of surfacing per-request.
    pub async fn new(opts: ServerOptions) -> Result<Self, BuildError> {
        let ServerOptions {
            root_dir,
            index,
            url_path_prefix,
            allowed_dirs,
            spa_fallback,
            push_content,
            not_found,
        } = opts;

        let root_dir = if root_dir.is_empty() {
            PathBuf::from(".")
        } else {
            PathBuf::from(root_dir)
        };
        let index = if index.is_empty() {
            "index.html"
        } else {
            index.as_str()
        };

        let resolver = PathResolver::new(index);
        let allowed =
            AllowedDirs::build(&root_dir, &allowed_dirs).map_err(BuildError::RootScan)?;
        let cache = FileCache::new();
        let negative = NegativeCache::new();

        // Rule keys and targets are canonicalized up front so trigger
        // matching at serve time works on cache keys. Triggers that
        // canonicalize to the same key (`/` and the index document)
        // merge their target lists; triggers are folded in sorted order
        // and duplicates dropped, so the merged order does not depend
        // on map iteration.
        let mut rules: HashMap<String, Vec<String>> =
            HashMap::with_capacity(push_content.len());
        let mut triggers: Vec<&String> = push_content.keys().collect();
        triggers.sort_unstable();
        for trigger in triggers {
            let merged = rules.entry(resolver.resolve(trigger)).or_default();
            for target in &push_content[trigger] {
                let canonical = path::clean(target);
                if !merged.contains(&canonical) {
                    merged.push(canonical);
                }
            }
        }
        let push = PushRegistry::new(rules, &url_path_prefix);

        // Every declared target is loaded before the server goes live,
        // so a push offer never races with population and a bad rule
        // fails startup instead of the first request.
        for target in push.all_targets() {
            if cache.lookup(target).is_some() {
                continue;
            }
            let file = file_under(&root_dir, target);
            if !allowed.is_allowed(&file) {
                return Err(BuildError::PushTargetDenied(target.to_string()));
            }
            cache
                .populate(target, &file)
                .await
                .map_err(|source| BuildError::PushPreload {
                    target: target.to_string(),
                    source,
                })?;
        }

        let not_found: Box<dyn NotFoundHandler> = match not_found {
            Some(handler) => handler,
            None if spa_fallback => {
                let key = resolver.index_path().to_string();
                let entry = match cache.lookup(&key) {
                    Some(entry) => entry,
                    None => cache
                        .populate(&key, &file_under(&root_dir, &key))
                        .await
                        .map_err(BuildError::IndexPreload)?,
                };
                Box::new(IndexFallback::new(entry))
            }
            None => Box::new(DefaultNotFound),
        };

        Ok(Self {
            root_dir,
            resolver,
            allowed,
            cache,
            negative,
            push,
            not_found,
        })
    }

    /// Serve one request.
    ///
    /// Never holds a cache lock across the filesystem read, and never
    /// lets a push failure affect the response.
    pub async fn serve<B>(
        &self,
        req: &Request<B>,
        pusher: Option<&dyn ResponsePusher>,
    ) -> Response<Full<Bytes>> {
        let method = req.method();
        if method != Method::GET && method != Method::HEAD {
            logger::log_warning(&format!("Method not allowed: {method}"));
            return http::build_405_response();
        }
        let is_head = *method == Method::HEAD;

        let canonical = self.resolver.resolve(req.uri().path());

        if let Some(entry) = self.cache.lookup(&canonical) {
            self.push.offer(pusher, &canonical);
            return respond_with_entry(&entry, req, is_head);
        }

        // Known-missing paths skip the filesystem entirely.
        if self.negative.contains(&canonical) {
            return self.push_and_fall_back(pusher, &canonical, is_head);
        }

        let file = self.file_path(&canonical);
        if !self.allowed.is_allowed(&file) {
            logger::log_warning(&format!("Directory access not allowed: {canonical}"));
            return http::build_403_response();
        }

        match self.cache.populate(&canonical, &file).await {
            Ok(entry) => {
                self.push.offer(pusher, &canonical);
                respond_with_entry(&entry, req, is_head)
            }
            Err(PopulateError::NotFound) => {
                // Concurrent first misses may both read the disk; the
                // recorded outcome is identical either way.
                self.negative.record(&canonical);
                self.push_and_fall_back(pusher, &canonical, is_head)
            }
            Err(e) => {
                // Transient read failures are not cached in either
                // direction so a later request can retry.
                logger::log_error(&format!("Failed to load {canonical}: {e}"));
                http::build_500_response(&e.to_string())
            }
        }
    }

    /// Miss path: offer the index page's declared assets, then delegate.
    fn push_and_fall_back(
        &self,
        pusher: Option<&dyn ResponsePusher>,
        canonical: &str,
        is_head: bool,
    ) -> Response<Full<Bytes>> {
        self.push.offer(pusher, self.resolver.index_path());
        self.not_found.respond(canonical, is_head)
    }

    fn file_path(&self, canonical: &str) -> PathBuf {
        file_under(&self.root_dir, canonical)
    }
}

/// Filesystem location of a canonical path under the root.
fn file_under(root: &Path, canonical: &str) -> PathBuf {
    root.join(canonical.trim_start_matches('/'))
}

/// Build the response for a cached entry, honoring conditional and
/// range headers.
fn respond_with_entry<B>(
    entry: &CachedFile,
    req: &Request<B>,
    is_head: bool,
) -> Response<Full<Bytes>> {
    if etag::matches(header_str(req, "if-none-match"), &entry.etag) {
        return http::build_304_response(&entry.etag);
    }

    let last_modified = http::http_date(entry.modified);
    let total_size = entry.data.len();

    match http::parse_range(header_str(req, "range"), total_size) {
        RangeOutcome::Valid(range) => {
            let start = range.start;
            let end = range.end_position(total_size);
            http::build_partial_response(
                entry.data.slice(start..=end),
                entry.content_type,
                &entry.etag,
                &last_modified,
                start,
                end,
                total_size,
                is_head,
            )
        }
        RangeOutcome::NotSatisfiable => http::build_416_response(total_size),
        RangeOutcome::Full => http::build_file_response(
            entry.data.clone(),
            entry.content_type,
            &entry.etag,
            &last_modified,
            is_head,
        ),
    }
}

fn header_str<'a, B>(req: &'a Request<B>, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|v| v.to_str().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::push::{PushError, PushOptions};
    use http_body_util::BodyExt;
    use std::fs;
    use std::sync::{Arc, Mutex};

    fn site() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(
            tmp.path().join("index.html"),
            "<!DOCTYPE html><html><body>app shell</body></html>",
        )
        .unwrap();
        fs::create_dir(tmp.path().join("css")).unwrap();
        fs::create_dir(tmp.path().join("js")).unwrap();
        fs::write(tmp.path().join("css/app.css"), "body { margin: 0 }").unwrap();
        fs::write(tmp.path().join("js/app.js"), "console.log(1);").unwrap();
        fs::write(tmp.path().join("robots.txt"), "User-agent: *\n").unwrap();
        tmp
    }

    fn options(root: &Path) -> ServerOptions {
        ServerOptions {
            root_dir: root.to_string_lossy().into_owned(),
            ..ServerOptions::default()
        }
    }

    fn get(path: &str) -> Request<()> {
        Request::builder()
            .method(Method::GET)
            .uri(path)
            .body(())
            .unwrap()
    }

    fn head(path: &str) -> Request<()> {
        Request::builder()
            .method(Method::HEAD)
            .uri(path)
            .body(())
            .unwrap()
    }

    async fn body_of(resp: Response<Full<Bytes>>) -> Bytes {
        resp.into_body().collect().await.unwrap().to_bytes()
    }

    struct RecordingPusher {
        pushed: Mutex<Vec<String>>,
    }

    impl RecordingPusher {
        fn new() -> Self {
            Self {
                pushed: Mutex::new(Vec::new()),
            }
        }

        fn pushed(&self) -> Vec<String> {
            self.pushed.lock().unwrap().clone()
        }
    }

    impl ResponsePusher for RecordingPusher {
        fn push(&self, target: &str, _opts: &PushOptions) -> Result<(), PushError> {
            self.pushed.lock().unwrap().push(target.to_string());
            Ok(())
        }
    }

    struct RefusingPusher;

    impl ResponsePusher for RefusingPusher {
        fn push(&self, target: &str, _opts: &PushOptions) -> Result<(), PushError> {
            Err(PushError::Refused(target.to_string()))
        }
    }

    #[tokio::test]
    async fn serves_files_and_answers_misses() {
        let tmp = site();
        let server = StaticFileServer::new(options(tmp.path())).await.unwrap();

        let resp = server.serve(&get("/"), None).await;
        assert_eq!(resp.status(), 200);
        assert!(resp.headers()["Content-Type"]
            .to_str()
            .unwrap()
            .contains("text/html"));

        let resp = server.serve(&get("/css/app.css"), None).await;
        assert_eq!(resp.status(), 200);
        assert!(resp.headers()["Content-Type"]
            .to_str()
            .unwrap()
            .contains("text/css"));

        let resp = server.serve(&get("/missing"), None).await;
        assert_eq!(resp.status(), 404);

        // Repeat miss and hit with the root directory gone: both answers
        // come from memory.
        fs::remove_dir_all(tmp.path()).unwrap();
        let resp = server.serve(&get("/missing"), None).await;
        assert_eq!(resp.status(), 404);
        let resp = server.serve(&get("/css/app.css"), None).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(body_of(resp).await.as_ref(), b"body { margin: 0 }");
    }

    #[tokio::test]
    async fn hit_is_idempotent_across_backing_changes() {
        let tmp = site();
        let server = StaticFileServer::new(options(tmp.path())).await.unwrap();

        let first = server.serve(&get("/css/app.css"), None).await;
        let first_etag = first.headers()["ETag"].to_str().unwrap().to_string();
        let first_body = body_of(first).await;

        // Rewriting the backing file must not change what is served.
        fs::write(tmp.path().join("css/app.css"), "body { margin: 8px }").unwrap();

        let second = server.serve(&get("/css/app.css"), None).await;
        assert_eq!(second.headers()["ETag"].to_str().unwrap(), first_etag);
        assert_eq!(body_of(second).await, first_body);
        assert_eq!(server.cache.len(), 1);
    }

    #[tokio::test]
    async fn negative_cache_outlives_file_creation() {
        let tmp = site();
        let server = StaticFileServer::new(options(tmp.path())).await.unwrap();

        let resp = server.serve(&get("/late.txt"), None).await;
        assert_eq!(resp.status(), 404);
        assert!(server.negative.contains("/late.txt"));

        // The file appearing later does not un-miss the path.
        fs::write(tmp.path().join("late.txt"), "too late").unwrap();
        let resp = server.serve(&get("/late.txt"), None).await;
        assert_eq!(resp.status(), 404);
        assert!(server.cache.lookup("/late.txt").is_none());
    }

    #[tokio::test]
    async fn allow_list_denies_tracked_dirs_only() {
        let tmp = site();
        let mut opts = options(tmp.path());
        opts.allowed_dirs = vec!["css".to_string(), "img".to_string()];
        let server = StaticFileServer::new(opts).await.unwrap();

        let resp = server.serve(&get("/js/app.js"), None).await;
        assert_eq!(resp.status(), 403);
        // Denied paths are cached in neither direction.
        assert!(server.cache.lookup("/js/app.js").is_none());
        assert!(!server.negative.contains("/js/app.js"));

        let resp = server.serve(&get("/js/app.js"), None).await;
        assert_eq!(resp.status(), 403);

        let resp = server.serve(&get("/css/app.css"), None).await;
        assert_eq!(resp.status(), 200);

        let resp = server.serve(&get("/robots.txt"), None).await;
        assert_eq!(resp.status(), 200);
    }

    #[tokio::test]
    async fn spa_fallback_serves_index_for_unknown_paths() {
        let tmp = site();
        let mut opts = options(tmp.path());
        opts.spa_fallback = true;
        let server = StaticFileServer::new(opts).await.unwrap();

        // The fallback shell is preloaded; removing it changes nothing.
        fs::remove_file(tmp.path().join("index.html")).unwrap();

        let resp = server.serve(&get("/dashboard/settings"), None).await;
        assert_eq!(resp.status(), 200);
        assert!(resp.headers()["Content-Type"]
            .to_str()
            .unwrap()
            .contains("text/html"));
        let body = body_of(resp).await;
        assert!(body.as_ref().ends_with(b"app shell</body></html>"));
    }

    #[tokio::test]
    async fn root_and_index_share_one_entry() {
        let tmp = site();
        let server = StaticFileServer::new(options(tmp.path())).await.unwrap();

        let via_root = body_of(server.serve(&get("/"), None).await).await;
        let via_index = body_of(server.serve(&get("/index.html"), None).await).await;

        assert_eq!(via_root, via_index);
        assert_eq!(server.cache.len(), 1);
        assert!(server.cache.lookup("/index.html").is_some());
    }

    #[tokio::test]
    async fn non_read_methods_are_rejected() {
        let tmp = site();
        let server = StaticFileServer::new(options(tmp.path())).await.unwrap();

        let post = Request::builder()
            .method(Method::POST)
            .uri("/")
            .body(())
            .unwrap();
        let resp = server.serve(&post, None).await;
        assert_eq!(resp.status(), 405);
        assert_eq!(resp.headers()["Allow"], "GET, HEAD");
    }

    #[tokio::test]
    async fn head_keeps_headers_and_drops_body() {
        let tmp = site();
        let server = StaticFileServer::new(options(tmp.path())).await.unwrap();

        let resp = server.serve(&head("/css/app.css"), None).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Length"], "18");
        assert!(body_of(resp).await.is_empty());
    }

    #[tokio::test]
    async fn matching_etag_returns_304() {
        let tmp = site();
        let server = StaticFileServer::new(options(tmp.path())).await.unwrap();

        let first = server.serve(&get("/css/app.css"), None).await;
        let etag = first.headers()["ETag"].to_str().unwrap().to_string();

        let conditional = Request::builder()
            .method(Method::GET)
            .uri("/css/app.css")
            .header("if-none-match", &etag)
            .body(())
            .unwrap();
        let resp = server.serve(&conditional, None).await;
        assert_eq!(resp.status(), 304);
        assert!(body_of(resp).await.is_empty());
    }

    #[tokio::test]
    async fn range_requests_are_honored() {
        let tmp = site();
        let server = StaticFileServer::new(options(tmp.path())).await.unwrap();

        let ranged = Request::builder()
            .method(Method::GET)
            .uri("/css/app.css")
            .header("range", "bytes=0-3")
            .body(())
            .unwrap();
        let resp = server.serve(&ranged, None).await;
        assert_eq!(resp.status(), 206);
        assert_eq!(resp.headers()["Content-Range"], "bytes 0-3/18");
        assert_eq!(body_of(resp).await.as_ref(), b"body");

        let out_of_range = Request::builder()
            .method(Method::GET)
            .uri("/css/app.css")
            .header("range", "bytes=999-")
            .body(())
            .unwrap();
        let resp = server.serve(&out_of_range, None).await;
        assert_eq!(resp.status(), 416);
        assert_eq!(resp.headers()["Content-Range"], "bytes */18");
    }

    #[tokio::test]
    async fn suffix_range_on_an_empty_file_is_unsatisfiable() {
        let tmp = site();
        fs::write(tmp.path().join("empty.txt"), "").unwrap();
        let server = StaticFileServer::new(options(tmp.path())).await.unwrap();

        let ranged = Request::builder()
            .method(Method::GET)
            .uri("/empty.txt")
            .header("range", "bytes=-5")
            .body(())
            .unwrap();
        let resp = server.serve(&ranged, None).await;
        assert_eq!(resp.status(), 416);
        assert_eq!(resp.headers()["Content-Range"], "bytes */0");

        // Without a range header the empty file serves normally.
        let resp = server.serve(&get("/empty.txt"), None).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Length"], "0");
    }

    #[tokio::test]
    async fn push_rule_preloads_and_offers_targets() {
        let tmp = site();
        let mut opts = options(tmp.path());
        opts.push_content.insert(
            "/".to_string(),
            vec!["/css/app.css".to_string(), "/js/app.js".to_string()],
        );
        let server = StaticFileServer::new(opts).await.unwrap();

        // Declared targets are cached before any request arrives.
        assert!(server.cache.lookup("/css/app.css").is_some());
        assert!(server.cache.lookup("/js/app.js").is_some());

        fs::remove_file(tmp.path().join("css/app.css")).unwrap();

        let pusher = RecordingPusher::new();
        let resp = server.serve(&get("/"), Some(&pusher)).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(pusher.pushed(), vec!["/css/app.css", "/js/app.js"]);

        // Preloaded target still serves after deletion.
        let resp = server.serve(&get("/css/app.css"), None).await;
        assert_eq!(resp.status(), 200);
    }

    #[tokio::test]
    async fn miss_offers_index_page_targets() {
        let tmp = site();
        let mut opts = options(tmp.path());
        opts.push_content
            .insert("/".to_string(), vec!["/css/app.css".to_string()]);
        let server = StaticFileServer::new(opts).await.unwrap();

        let pusher = RecordingPusher::new();
        let resp = server.serve(&get("/unknown/route"), Some(&pusher)).await;
        assert_eq!(resp.status(), 404);
        assert_eq!(pusher.pushed(), vec!["/css/app.css"]);
    }

    #[tokio::test]
    async fn push_urls_carry_the_path_prefix() {
        let tmp = site();
        let mut opts = options(tmp.path());
        opts.url_path_prefix = "/app".to_string();
        opts.push_content
            .insert("/".to_string(), vec!["/css/app.css".to_string()]);
        let server = StaticFileServer::new(opts).await.unwrap();

        // Cache keys stay unprefixed; only the offered URL is decorated.
        assert!(server.cache.lookup("/css/app.css").is_some());

        let pusher = RecordingPusher::new();
        server.serve(&get("/"), Some(&pusher)).await;
        assert_eq!(pusher.pushed(), vec!["/app/css/app.css"]);
    }

    #[tokio::test]
    async fn colliding_push_triggers_merge_their_targets() {
        let tmp = site();
        let mut opts = options(tmp.path());
        // "/" and "/index.html" canonicalize to the same trigger key.
        opts.push_content
            .insert("/".to_string(), vec!["/css/app.css".to_string()]);
        opts.push_content.insert(
            "/index.html".to_string(),
            vec!["/js/app.js".to_string(), "/css/app.css".to_string()],
        );
        let server = StaticFileServer::new(opts).await.unwrap();

        assert!(server.cache.lookup("/js/app.js").is_some());

        let pusher = RecordingPusher::new();
        server.serve(&get("/"), Some(&pusher)).await;
        // Targets fold in sorted trigger order, shared ones only once.
        assert_eq!(pusher.pushed(), vec!["/css/app.css", "/js/app.js"]);
    }

    #[tokio::test]
    async fn push_failure_never_fails_the_response() {
        let tmp = site();
        let mut opts = options(tmp.path());
        opts.push_content
            .insert("/".to_string(), vec!["/css/app.css".to_string()]);
        let server = StaticFileServer::new(opts).await.unwrap();

        let resp = server.serve(&get("/"), Some(&RefusingPusher)).await;
        assert_eq!(resp.status(), 200);
    }

    #[tokio::test]
    async fn denied_push_target_fails_construction() {
        let tmp = site();
        let mut opts = options(tmp.path());
        opts.allowed_dirs = vec!["css".to_string()];
        opts.push_content
            .insert("/".to_string(), vec!["/js/app.js".to_string()]);

        assert!(matches!(
            StaticFileServer::new(opts).await,
            Err(BuildError::PushTargetDenied(t)) if t == "/js/app.js"
        ));
    }

    #[tokio::test]
    async fn missing_push_target_fails_construction() {
        let tmp = site();
        let mut opts = options(tmp.path());
        opts.push_content
            .insert("/".to_string(), vec!["/css/woops.css".to_string()]);

        assert!(matches!(
            StaticFileServer::new(opts).await,
            Err(BuildError::PushPreload {
                source: PopulateError::NotFound,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn spa_fallback_without_index_fails_construction() {
        let tmp = tempfile::tempdir().unwrap();
        let mut opts = options(tmp.path());
        opts.spa_fallback = true;

        assert!(matches!(
            StaticFileServer::new(opts).await,
            Err(BuildError::IndexPreload(PopulateError::NotFound))
        ));
    }

    #[tokio::test]
    async fn custom_collaborator_owns_the_miss_response() {
        struct GoneNotFound;

        impl NotFoundHandler for GoneNotFound {
            fn respond(&self, _path: &str, _is_head: bool) -> Response<Full<Bytes>> {
                Response::builder()
                    .status(410)
                    .header("x-fallback", "custom")
                    .body(Full::new(Bytes::from_static(b"gone")))
                    .unwrap()
            }
        }

        let tmp = site();
        let mut opts = options(tmp.path());
        // A custom collaborator wins over the fallback flag.
        opts.spa_fallback = true;
        opts.not_found = Some(Box::new(GoneNotFound));
        let server = StaticFileServer::new(opts).await.unwrap();

        let resp = server.serve(&get("/vanished"), None).await;
        assert_eq!(resp.status(), 410);
        assert_eq!(resp.headers()["x-fallback"], "custom");
    }

    #[tokio::test]
    async fn directory_read_is_a_retryable_server_error() {
        let tmp = site();
        let server = StaticFileServer::new(options(tmp.path())).await.unwrap();

        let resp = server.serve(&get("/css"), None).await;
        assert_eq!(resp.status(), 500);
        // Not cached in either direction.
        assert!(server.cache.lookup("/css").is_none());
        assert!(!server.negative.contains("/css"));

        let resp = server.serve(&get("/css"), None).await;
        assert_eq!(resp.status(), 500);
    }

    #[tokio::test]
    async fn concurrent_first_misses_settle_on_one_entry() {
        let tmp = site();
        let server = Arc::new(StaticFileServer::new(options(tmp.path())).await.unwrap());

        let mut handles = Vec::new();
        for _ in 0..8 {
            let server = Arc::clone(&server);
            handles.push(tokio::spawn(async move {
                let resp = server.serve(&get("/css/app.css"), None).await;
                assert_eq!(resp.status(), 200);
                body_of(resp).await
            }));
        }

        for handle in handles {
            assert_eq!(handle.await.unwrap().as_ref(), b"body { margin: 0 }");
        }
        assert_eq!(server.cache.len(), 1);
    }
}
