//! Axum server setup
//!
//! Server skeleton with:
//! - Page routes plus static files from the public dir
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::routes;
use crate::currency::RateProvider;
use crate::db::WishlistStore;
use crate::uploads::UploadStore;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:5000)
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn WishlistStore>,
    pub rates: Arc<dyn RateProvider>,
    pub uploads: UploadStore,
}

impl AppState {
    pub fn new(
        store: Arc<dyn WishlistStore>,
        rates: Arc<dyn RateProvider>,
        uploads: UploadStore,
    ) -> Self {
        Self {
            store,
            rates,
            uploads,
        }
    }
}

/// Build the application router.
///
/// Anything no page route claims is looked up in the public dir, which
/// is also where uploaded images live.
pub fn build_router(state: AppState) -> Router {
    let static_files = ServeDir::new(state.uploads.public_dir());

    Router::new()
        .merge(routes::wishlists::router())
        .merge(routes::items::router())
        .merge(routes::totals::router())
        .merge(routes::search::router())
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Run the HTTP server.
///
/// # Example
///
/// ```ignore
/// let state = AppState::new(store, rates, UploadStore::new("public"));
/// run_server(state, ServerConfig::default()).await?;
/// ```
pub async fn run_server(state: AppState, config: ServerConfig) -> Result<(), ServerError> {
    tracing::info!(public_dir = %state.uploads.public_dir().display(), "Serving static files");
    let app = build_router(state);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Web server is running at http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down the server");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down the server");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
