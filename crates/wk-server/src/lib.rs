//! HTTP server for the wk wiki.
//!
//! This crate serves three page routes on top of a [`PageStore`]:
//! - `GET /view/{title}` renders a page, or redirects to its edit form
//! - `GET /edit/{title}` renders the edit form (blank for new pages)
//! - `POST /save/{title}` stores the submitted `body` field and redirects to the view
//!
//! Every other path answers with a plain 404.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use wk_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         host: "127.0.0.1".to_owned(),
//!         port: 8080,
//!         data_dir: PathBuf::from("pages"),
//!         templates_dir: None,
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum router
//!                      │
//!                      ├─► make_handler ──► RouteMatcher (reject → 404)
//!                      │        │
//!                      │        └─► view / edit / save
//!                      │                 │
//!                      │                 ├─► PageStore (load / save)
//!                      │                 └─► Templates (view.html / edit.html)
//!                      │
//!                      └─► fallback ──► 404
//! ```

mod app;
mod dispatch;
mod error;
mod form;
mod handlers;
mod middleware;
mod render;
mod route;
mod state;

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use state::AppState;
use wk_storage::{FsPageStore, PageStore};

pub use error::ServerError;
pub use render::{TemplateError, TemplateName, Templates};
pub use route::{Action, RouteError, RouteMatch, RouteMatcher, page_url};

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Directory holding `<title>.txt` page files.
    pub data_dir: PathBuf,
    /// Directory with `view.html` and `edit.html` (`None` uses the built-in templates).
    pub templates_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8080,
            data_dir: PathBuf::from("."),
            templates_dir: None,
        }
    }
}

/// Build the wiki router over `store` and `templates`.
pub fn router(store: Arc<dyn PageStore>, templates: Templates) -> Router {
    app::create_router(Arc::new(AppState::new(store, templates)))
}

/// Run the server.
///
/// Templates are compiled before the listener is bound, so a missing or
/// malformed template stops startup without serving any request.
///
/// # Errors
///
/// Returns an error if the templates fail to load or the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let templates = Templates::load(config.templates_dir.as_deref())?;
    tracing::info!(
        templates = %config
            .templates_dir
            .as_ref()
            .map_or_else(|| "built-in".to_owned(), |dir| dir.display().to_string()),
        "Templates compiled"
    );

    let store: Arc<dyn PageStore> = Arc::new(FsPageStore::new(config.data_dir.clone()));
    let app = router(store, templates);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        data_dir = %config.data_dir.display(),
        "Starting server"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from wk config.
#[must_use]
pub fn server_config_from_config(config: &wk_config::Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        data_dir: config.storage_resolved.data_dir.clone(),
        templates_dir: config.templates_resolved.dir.clone(),
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.data_dir, PathBuf::from("."));
        assert!(config.templates_dir.is_none());
    }

    #[test]
    fn test_server_config_from_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("wk.toml");
        std::fs::write(
            &path,
            "[server]\nport = 9000\n\n[storage]\ndata_dir = \"pages\"\n\n[templates]\ndir = \"theme\"\n",
        )
        .unwrap();
        let config = wk_config::Config::load(Some(&path), None).unwrap();

        let server_config = server_config_from_config(&config);

        assert_eq!(server_config.port, 9000);
        assert_eq!(server_config.data_dir, temp_dir.path().join("pages"));
        assert_eq!(
            server_config.templates_dir.as_deref(),
            Some(temp_dir.path().join("theme").as_path())
        );
    }

    #[tokio::test]
    async fn test_run_server_fails_fast_on_missing_templates() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            port: 1,
            data_dir: temp_dir.path().to_path_buf(),
            templates_dir: Some(Path::new("/nonexistent/templates").to_path_buf()),
            ..ServerConfig::default()
        };

        let err = run_server(config).await.unwrap_err();

        assert!(err.to_string().contains("view.html"));
    }
}
