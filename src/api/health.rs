//! Health check endpoints for liveness and readiness probes

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use tracing::{debug, warn};

use crate::api::types::Json;

use super::state::AppState;

/// Body of /health and /ready
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub checks: Vec<HealthCheck>,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

impl HealthStatus {
    fn status_code(self) -> StatusCode {
        match self {
            Self::Healthy => StatusCode::OK,
            Self::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// Outcome of probing one backend
#[derive(Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub latency_ms: u64,
}

impl HealthResponse {
    fn new(checks: Vec<HealthCheck>) -> Self {
        let status = if checks.iter().all(|c| c.status == HealthStatus::Healthy) {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        };

        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            checks,
        }
    }
}

/// Returns 200 while the process is up
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse::new(Vec::new()))
}

/// The default backend must answer a team listing
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let response = HealthResponse::new(vec![probe_default_backend(&state).await]);
    (response.status.status_code(), Json(response))
}

pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}

async fn probe_default_backend(state: &AppState) -> HealthCheck {
    let started = Instant::now();

    let outcome = match state.handlers.default_handler() {
        Ok(handler) => handler.select_teams().await.map(|teams| teams.len()),
        Err(e) => Err(e),
    };

    let (status, message) = match outcome {
        Ok(count) => {
            debug!(teams = count, "Readiness probe succeeded");
            (HealthStatus::Healthy, None)
        }
        Err(e) => {
            warn!(error = %e, "Readiness probe failed");
            (HealthStatus::Unhealthy, Some(e.to_string()))
        }
    };

    HealthCheck {
        name: format!("database:{}", state.handlers.default_kind()),
        status,
        message,
        latency_ms: started.elapsed().as_millis() as u64,
    }
}
