use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use valuemap_core::{QueryResolver, ServerConfig};
use valuemap_http::{AppState, create_router};

use crate::load_datasets;

pub(crate) async fn run(
    port: Option<u16>,
    host: Option<String>,
    data: Option<PathBuf>,
) -> Result<()> {
    let mut config = ServerConfig::from_env();
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(data) = data {
        config.data_path = data;
    }

    let datasets = Arc::new(load_datasets(&config.data_path)?);
    tracing::info!(
        "Loaded {} datasets from {}",
        datasets.len(),
        config.data_path.display()
    );
    if config.auth.enabled() {
        tracing::info!("HTTP Basic auth enabled for /search");
    } else {
        tracing::info!("HTTP_AUTH_USERNAME/HTTP_AUTH_PASSWORD not set, /search is open");
    }

    let addr = config.bind_addr();
    let state = Arc::new(AppState::new(QueryResolver::new(datasets), config.auth));
    let router = create_router(state);
    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
