//! Configuration module
//!
//! Type-safe configuration loading built on the `config` crate: an
//! optional `config.toml` merged with `SERVER_*` environment overrides
//! on top of built-in defaults.

mod state;
mod types;

pub use state::AppState;
pub use types::{Config, LoggingConfig, PerformanceConfig, ServerConfig, StaticConfig};

use std::net::SocketAddr;

impl Config {
    /// Load configuration from `config.toml` in the working directory.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from the given file (extension optional), with
    /// environment overrides and defaults filled in.
    pub fn load_from(path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("SERVER"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("static.root_dir", ".")?
            .set_default("static.index", "index.html")?
            .build()?;

        settings.try_deserialize()
    }

    /// Get the server socket address
    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid server address: {e}"))
    }
}
