//! HTTP server.
//!
//! Builds the axum router over the shared connection pool and serves it until
//! the process is asked to stop.

use axum::routing::{get, post};
use axum::Router;
use sqlx::AnyPool;
use tokio::net::TcpListener;
use tracing::info;

use super::methods::{create_track, delete_track, find_track, home, list_tracks, update_track};

/// State shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Process-wide connection pool. Each request takes one transaction from it.
    pub pool: AnyPool,
}

impl AppState {
    /// Creates new server state.
    pub fn new(pool: AnyPool) -> Self {
        Self { pool }
    }
}

/// Builds the router for every track endpoint.
///
/// `/tracks` (list) and `/tracks/` (create) are distinct routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/tracks", get(list_tracks))
        .route("/tracks/", post(create_track))
        .route(
            "/tracks/:id",
            get(find_track).put(update_track).delete(delete_track),
        )
        .with_state(state)
}

/// Serves the router on `listener` until Ctrl-C or SIGTERM.
///
/// In-flight requests are allowed to finish before this returns.
pub async fn run_server(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    info!(addr = %listener.local_addr()?, "HTTP server started");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP server stopped");
    Ok(())
}

/// Resolves when the process receives Ctrl-C or (on Unix) SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Could not listen for Ctrl-C");
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
                tracing::error!(error = %e, "Could not listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown requested");
}
