use axum::extract::{Request, State};
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;

use crate::metrics::ServerMetrics;

/// Tags each request with an id, logs its outcome and feeds the REST counters.
pub async fn request_log(
    State(metrics): State<Arc<ServerMetrics>>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let request_id = uuid::Uuid::new_v4().to_string();
    let span = tracing::info_span!(
        "request",
        %request_id,
        method = %request.method(),
        path = %request.uri().path(),
    );

    let mut response = next.run(request).instrument(span.clone()).await;

    let status = response.status();
    metrics.inc_rest_requests();
    metrics.record_status(status);
    metrics.record_rest_latency(start);

    span.in_scope(|| {
        tracing::info!(
            status = status.as_u16(),
            latency_us = start.elapsed().as_micros() as u64,
            "request completed"
        );
    });

    if let Ok(v) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert("x-request-id", v);
    }
    response
}
