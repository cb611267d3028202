pub mod handlers;
pub mod router;
pub mod state;
pub mod uispec;
pub mod views;

use standard_error::{Interpolate, StandardError};
use tokio::sync::broadcast::error::RecvError;

use crate::{conf::settings, pkg::internal::store::Store, prelude::Result};
use router::build_routes;
use state::AppState;

pub async fn listen() -> Result<()> {
    let state = AppState::new()?;
    spawn_store_logger(&state.store);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", settings.listen_port))
        .await
        .map_err(|e| StandardError::new("ERR-SRV-001").interpolate_err(e.to_string()))?;
    tracing::info!(
        "{} listening at port {}",
        settings.service_name,
        settings.listen_port
    );
    tokio::select! {
        r = axum::serve(listener, build_routes(state)) => {
            tracing::warn!("server ended unexpectedly: {:?}", &r)
        },
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("received ctrl+c interrupt, closing server");
        }
    }
    Ok(())
}

/// Logs every cache transition published by the store.
pub fn spawn_store_logger(store: &Store) {
    let mut events = store.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => tracing::debug!("{} -> {:?}", event.key, event.status),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("store logger skipped {} events", skipped)
                }
                Err(RecvError::Closed) => break,
            }
        }
    });
}
