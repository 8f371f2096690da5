//! Request handler module
//!
//! Static file dispatch over an in-memory cache, plus the collaborators
//! it is assembled from: path canonicalization, the directory
//! allow-list, push rules, and miss handling.

pub mod allow;
pub mod cache;
pub mod not_found;
pub mod path;
pub mod push;
pub mod router;
pub mod static_files;

// Re-export main entry points
pub use router::handle_request;
pub use static_files::{BuildError, ServerOptions, StaticFileServer};
