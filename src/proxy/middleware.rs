//! Middleware implementations for the checker's HTTP surface

use crate::proxy::headers::X_REQUEST_ID;
use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{error, info};
use uuid::Uuid;

/// Request ID middleware - ensures every request has a unique ID for tracing
///
/// An incoming `x-request-id` is kept when it is a valid UUID, otherwise a
/// fresh v7 UUID replaces it. The ID is echoed on the response.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|existing| existing.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .and_then(|uuid| HeaderValue::from_str(&uuid.to_string()).ok())
        .unwrap_or_else(fresh_request_id);

    request
        .headers_mut()
        .insert(X_REQUEST_ID, request_id.clone());

    let mut response = next.run(request).await;
    response.headers_mut().insert(X_REQUEST_ID, request_id);

    response
}

fn fresh_request_id() -> HeaderValue {
    HeaderValue::from_str(&Uuid::now_v7().to_string())
        .unwrap_or_else(|_| HeaderValue::from_static("unknown"))
}

/// Logging middleware - logs request/response details with timing
///
/// Only the path is logged; query strings may carry proxy credentials.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();

    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = request_id_of(&request);

    info!(
        request_id = request_id,
        method = %method,
        path = %path,
        "Incoming request"
    );

    let response = next.run(request).await;

    info!(
        request_id = request_id,
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        duration_ms = start.elapsed().as_millis(),
        "Request completed"
    );

    response
}

/// Error logging wrapper that makes sure failed responses carry the request ID
pub async fn error_handling_middleware(request: Request, next: Next) -> Response {
    let request_id = request_id_of(&request);

    let mut response = next.run(request).await;
    if response.status().is_client_error() || response.status().is_server_error() {
        error!(
            request_id = request_id,
            status = response.status().as_u16(),
            "Request failed"
        );

        if let Ok(header_value) = HeaderValue::from_str(&request_id) {
            response.headers_mut().insert(X_REQUEST_ID, header_value);
        }
    }

    response
}

fn request_id_of(request: &Request) -> String {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}
