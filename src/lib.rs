//! Memory-caching static file server.
//!
//! Serves a directory tree out of an in-memory cache that is populated
//! lazily on first request and never evicted, with a permanent
//! known-missing set alongside it. Supports a subdirectory allow-list,
//! single-page-application fallback to the index page, and HTTP/2
//! server push advertisement for dependent assets.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
