//! HTTP/JSON transport over the core operations.

pub mod error;
pub mod handlers;
mod request_log;

use crate::db::pool::DbPool;
use crate::errors::AppResult;
use axum::Router;
use axum::middleware::from_fn;
use axum::routing::{get, post};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tracing::info;

/// Shared by every handler. The connection is the only mutable state of the
/// server.
#[derive(Clone)]
pub struct ServerState {
    pub db: Arc<Mutex<DbPool>>,
}

impl ServerState {
    pub fn new(pool: DbPool) -> Self {
        Self {
            db: Arc::new(Mutex::new(pool)),
        }
    }
}

pub fn build_router(state: ServerState) -> Router {
    Router::new()
        .route("/healthz", get(handlers::health_check))
        .route("/", get(handlers::status))
        .route("/status", get(handlers::status))
        .route("/stats", get(handlers::stats))
        .route("/start", post(handlers::start))
        .route("/stop", post(handlers::stop))
        .route(
            "/groups",
            get(handlers::list_groups).post(handlers::create_group),
        )
        .route("/groups/reset", post(handlers::reset_group))
        .route("/groups/:id/update", post(handlers::update_group))
        .route("/groups/:id/delete", post(handlers::delete_group))
        .route("/export/csv", get(handlers::export_csv))
        .layer(from_fn(request_log::log_requests))
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(pool: DbPool, addr: &str) -> AppResult<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "server listening");

    axum::serve(listener, build_router(ServerState::new(pool)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
