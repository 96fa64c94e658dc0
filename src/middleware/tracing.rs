use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, info_span, warn, Instrument};

/// Per-request span plus a completion event with status and latency.
pub async fn observability_middleware(
    matched_path: MatchedPath,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let route = matched_path.as_str().to_string();
    let start_time = Instant::now();

    let span = info_span!(
        "http_request",
        method = %method,
        uri = %uri,
        route = %route,
        request_id = %uuid::Uuid::now_v7(),
    );

    let response = next.run(request).instrument(span.clone()).await;

    let latency_ms = start_time.elapsed().as_millis() as u64;
    let status = response.status().as_u16();

    let _guard = span.enter();
    if status >= 500 {
        warn!(status, latency_ms, "request failed");
    } else {
        info!(status, latency_ms, "request completed");
    }

    response
}
