/// Webserver lifecycle: bind, serve, graceful shutdown
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;

use crate::logger::{self, LogTag};

use super::routes;
use super::state::AppState;

static SHUTDOWN: Lazy<Notify> = Lazy::new(Notify::new);

/// Ask a running server to stop accepting connections and drain
pub fn shutdown() {
    SHUTDOWN.notify_waiters();
}

pub async fn start_server(state: AppState) -> Result<()> {
    let addr = format!(
        "{}:{}",
        state.config.webserver.host, state.config.webserver.port
    );

    let router = routes::create_router(state)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive());

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind webserver to {}", addr))?;
    logger::log(LogTag::Webserver, "LISTEN", &format!("http://{}", addr));

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            SHUTDOWN.notified().await;
            logger::log(LogTag::Webserver, "STOP", "shutdown requested, draining");
        })
        .await
        .context("Webserver terminated unexpectedly")?;

    logger::log(LogTag::Webserver, "STOP", "webserver stopped");
    Ok(())
}
