//! Request logging middleware for the todo API
//!
//! Emits a single structured line per request with method, path, status,
//! and timing.

use axum::{body::Body, extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::info;

pub async fn request_logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start_time = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let query = request.uri().query().unwrap_or_default().to_string();

    let response = next.run(request).await;
    let duration = start_time.elapsed();

    info!(
        %method,
        path = %path,
        query = %query,
        status = response.status().as_u16(),
        duration_ms = duration.as_millis() as u64,
        "Request handled"
    );

    response
}
