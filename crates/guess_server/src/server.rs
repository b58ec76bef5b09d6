//! Running the HTTP server.

use crate::config::ServerConfig;
use crate::routes::{AppState, router};
use crate::store::MemorySessionStore;
use anyhow::Result;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Serves the game until Ctrl+C.
#[instrument(skip_all, fields(host = %config.host(), port = config.port()))]
pub async fn serve(config: ServerConfig) -> Result<()> {
    let state = AppState::from_config(&config)?;
    let purger = spawn_purger(state.service().store().clone(), config.purge_interval());
    let app = router(state);

    let listener = tokio::net::TcpListener::bind((config.host().as_str(), *config.port())).await?;
    info!(addr = %listener.local_addr()?, "Server ready");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    purger.abort();
    info!("Server stopped");
    Ok(())
}

/// Sweeps expired sessions from `store` every `interval`.
pub fn spawn_purger(store: MemorySessionStore, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let removed = store.purge_expired();
            debug!(removed, "Expiry sweep finished");
        }
    })
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown requested"),
        Err(e) => warn!(error = %e, "Failed to listen for Ctrl+C"),
    }
}
