//! Configuration type definitions

use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    #[serde(rename = "static")]
    pub static_files: StaticConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    pub access_log_file: Option<String>,
    pub error_log_file: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

/// Settings for the static file server itself.
#[derive(Debug, Deserialize, Clone)]
pub struct StaticConfig {
    /// Directory tree served out of the cache.
    pub root_dir: String,
    /// File served for `/`, and the single-page-application fallback body.
    pub index: String,
    /// Prefix prepended to advertised push URLs, not to cache keys.
    #[serde(default)]
    pub url_path_prefix: String,
    /// Subdirectory allow-list; empty allows everything.
    #[serde(default)]
    pub allowed_dirs: Vec<String>,
    /// Serve the index page for unknown paths instead of 404.
    #[serde(default)]
    pub spa_fallback: bool,
    /// Push rules: request path to the asset paths advertised with it.
    #[serde(default)]
    pub push_content: HashMap<String, Vec<String>>,
}

fn default_access_log_format() -> String {
    "combined".to_string()
}
