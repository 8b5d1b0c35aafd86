//! Serve command - runs the HTTP API

use std::net::SocketAddr;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use crate::api::{create_router, create_router_with_metrics};
use crate::config::AppConfig;
use crate::infrastructure::observability::init_metrics;

/// Run the API server until SIGINT or SIGTERM
pub async fn run() -> anyhow::Result<()> {
    let config = super::bootstrap()?;

    let state = crate::create_app_state_with_config(&config).await?;
    let metrics_config = &config.observability.metrics;
    let app = match init_metrics(metrics_config) {
        Some(metrics) => create_router_with_metrics(state, metrics, &metrics_config.path),
        None => create_router(state),
    };

    let addr = build_socket_addr(&config)?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", config.server_address()))?;
    info!(%addr, "Starting API server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API server shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

fn build_socket_addr(config: &AppConfig) -> anyhow::Result<SocketAddr> {
    let ip = config
        .server
        .host
        .parse::<std::net::IpAddr>()
        .with_context(|| format!("invalid server.host '{}'", config.server.host))?;

    Ok(SocketAddr::from((ip, config.server.port)))
}
