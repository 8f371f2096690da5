//! Application state module

use super::types::Config;
use crate::handler::{BuildError, ServerOptions, StaticFileServer};

/// Shared application state handed to every connection.
pub struct AppState {
    pub config: Config,
    pub static_server: StaticFileServer,
}

impl AppState {
    /// Build the runtime state. The static file server is constructed
    /// once here: the root is scanned for the allow-list and push
    /// targets are preloaded, so a broken static section fails startup
    /// instead of the first request.
    pub async fn new(config: Config) -> Result<Self, BuildError> {
        let s = &config.static_files;
        let static_server = StaticFileServer::new(ServerOptions {
            root_dir: s.root_dir.clone(),
            index: s.index.clone(),
            url_path_prefix: s.url_path_prefix.clone(),
            allowed_dirs: s.allowed_dirs.clone(),
            spa_fallback: s.spa_fallback,
            push_content: s.push_content.clone(),
            not_found: None,
        })
        .await?;

        Ok(Self {
            config,
            static_server,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn base_config(root: &std::path::Path) -> Config {
        let mut cfg = Config::load_from("no-such-config-file").unwrap();
        cfg.static_files.root_dir = root.to_string_lossy().into_owned();
        cfg
    }

    #[tokio::test]
    async fn builds_the_static_server_from_config() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("index.html"), "<html></html>").unwrap();

        let state = AppState::new(base_config(tmp.path())).await.unwrap();

        let req = hyper::Request::builder().uri("/").body(()).unwrap();
        let resp = state.static_server.serve(&req, None).await;
        assert_eq!(resp.status(), 200);
    }

    #[tokio::test]
    async fn startup_fails_on_a_missing_root() {
        let tmp = tempfile::tempdir().unwrap();
        let mut cfg = base_config(&tmp.path().join("gone"));
        cfg.static_files.allowed_dirs = vec!["css".to_string()];

        assert!(matches!(
            AppState::new(cfg).await,
            Err(BuildError::RootScan(_))
        ));
    }

    #[tokio::test]
    async fn startup_fails_on_a_bad_push_target() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("index.html"), "<html></html>").unwrap();

        let mut cfg = base_config(tmp.path());
        cfg.static_files
            .push_content
            .insert("/".to_string(), vec!["/css/missing.css".to_string()]);

        assert!(matches!(
            AppState::new(cfg).await,
            Err(BuildError::PushPreload { .. })
        ));
    }
}
