//! Server push advertisement module
//!
//! Maps served paths to dependent assets that should be offered to
//! push-capable clients. Push is a capability of the transport, modeled
//! as a trait the connection layer may or may not provide; when absent,
//! every offer is a silent no-op.

use crate::handler::path;
use crate::logger;
use hyper::header::{HeaderName, HeaderValue};
use hyper::{HeaderMap, Method};
use std::collections::HashMap;
use thiserror::Error;

/// Marker header identifying internally triggered pushes.
pub const PUSHED_FROM: &str = "pushed-from";

/// Why a push offer was not delivered.
#[derive(Debug, Error)]
pub enum PushError {
    #[error("connection does not support server push")]
    NotSupported,
    #[error("push refused: {0}")]
    Refused(String),
}

/// Request options accompanying a push offer.
pub struct PushOptions {
    pub method: Method,
    pub headers: HeaderMap,
}

impl PushOptions {
    fn internal() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static(PUSHED_FROM),
            HeaderValue::from_static("memstatic"),
        );
        Self {
            method: Method::GET,
            headers,
        }
    }
}

/// Capability interface for transports that can push responses.
///
/// Plain HTTP/1 connections never implement this; the dispatcher takes
/// an `Option` and treats `None` as "no push support".
pub trait ResponsePusher: Send + Sync {
    /// Offer `target` for server push.
    fn push(&self, target: &str, opts: &PushOptions) -> Result<(), PushError>;
}

/// Push rules keyed by canonical trigger path.
pub struct PushRegistry {
    rules: HashMap<String, Vec<String>>,
    url_path_prefix: String,
    options: PushOptions,
}

impl PushRegistry {
    /// Build the registry from canonicalized trigger-to-targets rules.
    ///
    /// `url_path_prefix` decorates the offered URLs only; rule keys and
    /// stored targets stay canonical so they line up with cache keys.
    pub fn new(rules: HashMap<String, Vec<String>>, url_path_prefix: &str) -> Self {
        let prefix = path::clean(url_path_prefix);
        Self {
            rules,
            url_path_prefix: if prefix == "/" { String::new() } else { prefix },
            options: PushOptions::internal(),
        }
    }

    /// Ordered push targets declared for a canonical path.
    pub fn targets(&self, canonical_path: &str) -> &[String] {
        self.rules.get(canonical_path).map_or(&[], Vec::as_slice)
    }

    /// Every target across all rules, in rule order.
    pub fn all_targets(&self) -> impl Iterator<Item = &str> {
        self.rules.values().flatten().map(String::as_str)
    }

    /// Offer every target declared for `canonical_path` to the pusher.
    ///
    /// Failures are logged and swallowed: push is a performance hint and
    /// the asset stays fetchable with an ordinary request.
    pub fn offer(&self, pusher: Option<&dyn ResponsePusher>, canonical_path: &str) {
        let Some(pusher) = pusher else { return };

        for target in self.targets(canonical_path) {
            let url = format!("{}{}", self.url_path_prefix, target);
            if let Err(e) = pusher.push(&url, &self.options) {
                logger::log_push_failed(&url, &e);
            }
        }
    }
}
