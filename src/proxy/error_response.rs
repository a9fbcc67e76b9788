//! Unified error response handling for the checker's HTTP surface
//!
//! Errors that escape a check (the direct path's transport failures and the
//! proxy path's "no proxy configured") are rendered in one JSON shape, with
//! the request ID echoed for correlation.

use crate::proxy::headers::X_REQUEST_ID;
use crate::proxy::types::CheckError;
use axum::{
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Standard error response format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Unique error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Request ID for correlation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            request_id: None,
        }
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Convert to HTTP response with proper headers
    pub fn into_response_with_status(self, status: StatusCode) -> Response {
        let request_id = self.request_id.clone();
        let mut response = (status, Json(self)).into_response();

        if let Some(id) = request_id {
            if let Ok(header_value) = HeaderValue::from_str(&id) {
                response.headers_mut().insert(X_REQUEST_ID, header_value);
            }
        }

        response
    }
}

/// Extension trait for consistent error formatting
pub trait ErrorResponseExt {
    /// Convert to standardized error response
    fn to_error_response(&self) -> ErrorResponse;

    /// Get the appropriate HTTP status code
    fn status_code(&self) -> StatusCode;

    /// Render as a response correlated with `request_id`
    fn into_error_response(self, request_id: Option<String>) -> Response
    where
        Self: Sized,
    {
        let status = self.status_code();
        let mut error = self.to_error_response();
        if let Some(id) = request_id {
            error = error.with_request_id(id);
        }
        error.into_response_with_status(status)
    }
}

impl ErrorResponseExt for CheckError {
    fn to_error_response(&self) -> ErrorResponse {
        use CheckError::*;

        let code = match self {
            NoProxyConfigured => "NO_PROXY_CONFIGURED",
            InvalidProxyUri { .. } => "INVALID_PROXY_URI",
            InvalidTargetUri(_) => "INVALID_TARGET_URI",
            ClientBuild(_) => "CLIENT_BUILD_ERROR",
            Timeout(_) => "REQUEST_TIMEOUT",
            Transport(_) => "CONNECTION_ERROR",
        };

        ErrorResponse::new(code, self.to_string())
    }

    fn status_code(&self) -> StatusCode {
        use CheckError::*;

        match self {
            InvalidTargetUri(_) | InvalidProxyUri { .. } => StatusCode::BAD_REQUEST,
            Transport(_) => StatusCode::BAD_GATEWAY,
            Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            NoProxyConfigured | ClientBuild(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CheckError {
    fn into_response(self) -> Response {
        self.into_error_response(None)
    }
}

/// Helper to extract request ID from headers
pub fn extract_request_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(X_REQUEST_ID)
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_error_response_creation() {
        let error = ErrorResponse::new("TEST_ERROR", "Test error message");
        assert_eq!(error.code, "TEST_ERROR");
        assert_eq!(error.message, "Test error message");
        assert!(error.request_id.is_none());
    }

    #[test]
    fn test_no_proxy_configured_maps_to_internal_error() {
        let error = CheckError::NoProxyConfigured;
        let response = error.to_error_response();
        assert_eq!(response.code, "NO_PROXY_CONFIGURED");
        assert!(response.message.contains("CDP_HTTP_PROXY"));
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_transport_errors_map_to_gateway_statuses() {
        assert_eq!(
            CheckError::Transport("refused".to_string()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            CheckError::Timeout(Duration::from_secs(30)).status_code(),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            CheckError::InvalidTargetUri("x".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_error_response_carries_request_id_header() {
        let response = CheckError::Transport("refused".to_string())
            .into_error_response(Some("req-123".to_string()));

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            response.headers().get(X_REQUEST_ID).unwrap(),
            "req-123"
        );
    }

    #[test]
    fn test_extract_request_id() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_request_id(&headers), None);

        headers.insert(X_REQUEST_ID, HeaderValue::from_static("abc"));
        assert_eq!(extract_request_id(&headers), Some("abc".to_string()));
    }
}
