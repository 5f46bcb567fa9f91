use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;

use kindred_shared::{HealthCheck, HealthResponse, HealthStatus};

use crate::AppState;

/// Health check that probes the store.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Response {
    let store_check = match state.store.ping() {
        Ok(()) => HealthCheck {
            name: "store".to_string(),
            status: HealthStatus::Healthy,
            message: None,
        },
        Err(e) => HealthCheck {
            name: "store".to_string(),
            status: HealthStatus::Unhealthy,
            message: Some(e.to_string()),
        },
    };

    let response = HealthResponse::healthy("kindred-api", env!("CARGO_PKG_VERSION"))
        .with_checks(vec![store_check]);

    let status = match response.status {
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::OK,
    };

    (status, Json(response)).into_response()
}

/// Returns Prometheus metrics.
pub async fn metrics(State(state): State<Arc<AppState>>) -> String {
    state
        .metrics_handle
        .as_ref()
        .map(|handle| handle.render())
        .unwrap_or_default()
}
