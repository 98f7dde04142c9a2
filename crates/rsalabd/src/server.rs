//! Service lifecycle: store, metrics listener, API server, shutdown

use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use rsalab_core::config::RsaLabConfig;
use std::sync::Arc;
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info, warn};

use crate::auth::PlatformHeaderResolver;
use crate::extract::Utf8TextExtractor;
use crate::metrics::{ApiMetrics, HealthState};
use crate::state::{self, AppState};

pub async fn run(config: RsaLabConfig) -> Result<()> {
    // Open the saved-ciphertext store
    let store = rsalab_store::open_store(&config.store)
        .with_context(|| format!("opening {} store", config.store.backend))?;
    info!(
        backend = %config.store.backend,
        records = store.len(),
        "ciphertext store ready"
    );
    let store = state::new_shared(store);

    let mut registry = Registry::default();
    let metrics = ApiMetrics::new(&mut registry);

    // Start Prometheus metrics endpoint
    if let Some(addr) = config.server.metrics_addr.clone() {
        let health = HealthState {
            registry: Arc::new(registry),
            store: store.clone(),
        };
        tokio::spawn(async move {
            if let Err(e) = crate::metrics::serve(addr, health).await {
                error!("metrics server failed: {e}");
            }
        });
    }

    let listen = config.server.listen.clone();
    let app_state = AppState {
        resolver: Arc::new(PlatformHeaderResolver::new(&config.auth)),
        extractor: Arc::new(Utf8TextExtractor),
        metrics,
        store: store.clone(),
        config: Arc::new(config),
    };
    let app = crate::routes::router(app_state);

    // Register signal handlers before accepting traffic
    let mut sigterm = signal(SignalKind::terminate()).context("registering SIGTERM handler")?;
    let mut sigint = signal(SignalKind::interrupt()).context("registering SIGINT handler")?;

    let listener = tokio::net::TcpListener::bind(&listen)
        .await
        .with_context(|| format!("binding API listener on {listen}"))?;
    info!(addr = %listen, "api: listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            tokio::select! {
                _ = sigterm.recv() => info!("SIGTERM received, shutting down"),
                _ = sigint.recv() => info!("SIGINT received, shutting down"),
            }
        })
        .await
        .context("api server")?;

    if let Err(e) = store.write().await.flush() {
        warn!("store flush on shutdown failed: {e}");
    }
    info!("rsalabd stopped");
    Ok(())
}
