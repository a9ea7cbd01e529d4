//! Per-request database backend selection

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::DatabaseHandler;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct BackendQuery {
    pub(crate) backend: Option<String>,
}

/// Extractor yielding the handler chosen by `?backend=`, or the default one.
///
/// Unknown or disabled backends are a configuration error (HTTP 500).
pub struct Backend(pub Arc<dyn DatabaseHandler>);

impl FromRequestParts<AppState> for Backend {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<BackendQuery>::try_from_uri(&parts.uri)
            .map_err(|e| ApiError::bad_request(format!("Invalid query string: {}", e)))?;

        if let Some(backend) = &query.backend {
            debug!(backend = %backend, "Request selected database backend");
        }

        let handler = state.handlers.resolve(query.backend.as_deref())?;
        Ok(Backend(handler))
    }
}
