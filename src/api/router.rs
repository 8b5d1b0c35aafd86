use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::infrastructure::observability::{create_metrics_router, PrometheusMetrics};

use super::auth;
use super::health;
use super::middleware::{logging_middleware, metrics_middleware, security_headers_middleware};
use super::state::AppState;

/// Create the full router with application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Probes
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Registration and login
        .nest("/api/v1/auth", auth::create_auth_router())
        .with_state(state)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Create the router and expose Prometheus metrics at `path`
pub fn create_router_with_metrics(state: AppState, metrics: PrometheusMetrics, path: &str) -> Router {
    create_router(state).merge(create_metrics_router(metrics, path))
}
