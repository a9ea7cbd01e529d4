//! Request logging

use std::time::Instant;

use axum::{
    body::Body,
    extract::{MatchedPath, Query},
    http::{Request, Uri},
    middleware::Next,
    response::Response,
};
use tracing::{info, warn};

use super::backend::BackendQuery;

/// Logs one line per request with the matched route, chosen backend and outcome.
/// Runs inside the span opened by `TraceLayer`, so it does not open its own.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = matched_path(&request);
    let backend = backend_param(request.uri()).unwrap_or_else(|| "default".to_string());

    let response = next.run(request).await;

    let status = response.status();
    let duration_ms = start.elapsed().as_millis() as u64;

    if status.is_server_error() {
        warn!(
            method = %method,
            path = %path,
            backend = %backend,
            status = status.as_u16(),
            duration_ms,
            "Request failed"
        );
    } else {
        info!(
            method = %method,
            path = %path,
            backend = %backend,
            status = status.as_u16(),
            duration_ms,
            "Request completed"
        );
    }

    response
}

fn matched_path(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string())
}

/// Decoded `?backend=` value, as the `Backend` extractor will see it
fn backend_param(uri: &Uri) -> Option<String> {
    Query::<BackendQuery>::try_from_uri(uri)
        .ok()
        .and_then(|Query(query)| query.backend)
}
