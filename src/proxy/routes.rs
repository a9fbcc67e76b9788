//! Axum routes exposing the connectivity checks
//!
//! - `GET /direct?uri=<target>`
//! - `GET /proxy?uri=<target>&proxy=<optional proxy URI>`
//! - `GET /health`

use crate::proxy::error_response::{extract_request_id, ErrorResponseExt};
use crate::proxy::headers::paths;
use crate::proxy::middleware_stack::MiddlewareStack;
use crate::proxy::service::ConnectivityChecker;
use crate::proxy::types::ProxyResult;
use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

/// Shared handle to the checker used by every handler
pub type SharedChecker = Arc<dyn ConnectivityChecker>;

#[derive(Debug, Deserialize)]
pub struct DirectQuery {
    pub uri: String,
}

#[derive(Deserialize)]
pub struct ProxyQuery {
    pub uri: String,
    pub proxy: Option<String>,
}

/// Build the router with the middleware stack applied
pub fn router(checker: SharedChecker) -> Router {
    router_with_stack(checker, MiddlewareStack::new())
}

pub fn router_with_stack(checker: SharedChecker, stack: MiddlewareStack) -> Router {
    let router = Router::new()
        .route(paths::DIRECT, get(direct_handler))
        .route(paths::PROXY, get(proxy_handler))
        .route(paths::HEALTH, get(health_handler))
        .with_state(checker);

    stack.apply_to_router(router)
}

async fn direct_handler(
    State(checker): State<SharedChecker>,
    headers: HeaderMap,
    Query(query): Query<DirectQuery>,
) -> Result<Json<ProxyResult>, Response> {
    checker
        .call_direct(&query.uri)
        .await
        .map(Json)
        .map_err(|error| error.into_error_response(extract_request_id(&headers)))
}

async fn proxy_handler(
    State(checker): State<SharedChecker>,
    headers: HeaderMap,
    Query(query): Query<ProxyQuery>,
) -> Result<Json<ProxyResult>, Response> {
    checker
        .call_proxy(&query.uri, query.proxy.as_deref())
        .await
        .map(Json)
        .map_err(|error| error.into_error_response(extract_request_id(&headers)))
}

/// Liveness and readiness probe
async fn health_handler() -> impl IntoResponse {
    "OK"
}
