//! Middleware stack builder for clean composition
//!
//! This module provides a builder for composing the Tower middleware stack,
//! making it easier to maintain and test the middleware pipeline.

use crate::proxy::middleware::*;
use axum::{middleware::from_fn, Router};

/// Builder for composing the checker's middleware stack
#[derive(Clone, Copy, Debug)]
pub struct MiddlewareStack {
    enable_logging: bool,
}

impl Default for MiddlewareStack {
    fn default() -> Self {
        Self {
            enable_logging: true,
        }
    }
}

impl MiddlewareStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip per-request logging
    pub fn without_logging(mut self) -> Self {
        self.enable_logging = false;
        self
    }

    /// Apply the complete middleware stack to a router
    ///
    /// The middleware are applied in the following order (outer to inner):
    /// 1. Request ID generation/propagation
    /// 2. Logging (with request ID)
    /// 3. Error handling
    pub fn apply_to_router<S>(self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        let router = router.layer(from_fn(error_handling_middleware));
        let router = if self.enable_logging {
            router.layer(from_fn(logging_middleware))
        } else {
            router
        };

        router.layer(from_fn(request_id_middleware))
    }
}
