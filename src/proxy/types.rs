//! Type definitions for the proxy check module

use http::StatusCode;
use nutype::nutype;
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::time::Duration;
use thiserror::Error;
use url::Url;

// ========== Constants ==========

/// Token substituted for any credential shown to operators or written to logs
pub const MASK: &str = "*****";

/// Status reported when no HTTP response could be obtained
pub const STATUS_INTERNAL_ERROR: u16 = 500;

/// User agent sent with every probe
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

// ========== Target Types ==========

/// Absolute http(s) URL that a probe is sent to
#[nutype(
    derive(Clone, Debug, Display, PartialEq, Eq, Deserialize, Serialize, AsRef),
    validate(predicate = |s: &str| is_http_url(s)),
)]
pub struct TargetUrl(String);

impl TargetUrl {
    /// Validate a caller-supplied target, reporting it verbatim on failure
    pub fn parse(raw: &str) -> CheckResult<Self> {
        Self::try_new(raw.to_string()).map_err(|_| CheckError::InvalidTargetUri(raw.to_string()))
    }
}

fn is_http_url(raw: &str) -> bool {
    Url::parse(raw)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false)
}

// ========== Outcome Types ==========

/// Raw outcome of a single GET issued by the request executor
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionOutcome {
    status: StatusCode,
    error_body: Option<String>,
}

impl ExecutionOutcome {
    /// A 2xx response; its body was never read
    pub fn success(status: StatusCode) -> Self {
        Self {
            status,
            error_body: None,
        }
    }

    /// A non-2xx response together with its body text
    pub fn failure(status: StatusCode, body: String) -> Self {
        Self {
            status,
            error_body: Some(body),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn error_body(&self) -> Option<&str> {
        self.error_body.as_deref()
    }
}

/// Path a probe took to reach its target
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProbeRoute {
    Direct,
    /// Through a forward proxy, identified by its redacted address
    Proxy { redacted_url: String },
}

impl ProbeRoute {
    pub fn via_proxy(&self) -> bool {
        matches!(self, Self::Proxy { .. })
    }

    fn into_proxy_url(self) -> Option<String> {
        match self {
            Self::Direct => None,
            Self::Proxy { redacted_url } => Some(redacted_url),
        }
    }
}

/// Normalized report of one diagnostic call
///
/// Built exactly once per call and never mutated afterwards. `error` is only
/// present when the target answered with a non-2xx status or could not be
/// reached, and `body_length` is the byte length of a captured error body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResult {
    uri: String,
    status_code: u16,
    error: Option<String>,
    body_length: usize,
    via_proxy: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    proxy_url: Option<String>,
}

impl ProxyResult {
    /// Build a result from an HTTP response, successful or not
    pub fn from_outcome(uri: impl Into<String>, outcome: ExecutionOutcome, route: ProbeRoute) -> Self {
        let body_length = outcome.error_body.as_ref().map_or(0, String::len);

        Self {
            uri: uri.into(),
            status_code: outcome.status.as_u16(),
            error: outcome.error_body,
            body_length,
            via_proxy: route.via_proxy(),
            proxy_url: route.into_proxy_url(),
        }
    }

    /// Build a result for a proxied call that never produced a response
    pub fn from_proxy_failure(
        uri: impl Into<String>,
        error: &CheckError,
        redacted_proxy: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            status_code: STATUS_INTERNAL_ERROR,
            error: Some(error.to_string()),
            body_length: 0,
            via_proxy: true,
            proxy_url: Some(redacted_proxy.into()),
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn body_length(&self) -> usize {
        self.body_length
    }

    pub fn via_proxy(&self) -> bool {
        self.via_proxy
    }

    pub fn proxy_url(&self) -> Option<&str> {
        self.proxy_url.as_deref()
    }
}

// ========== Errors ==========

/// Errors that can occur while checking connectivity
#[derive(Error, Debug)]
pub enum CheckError {
    #[error("No proxy settings were found. Check CDP_HTTP_PROXY is set")]
    NoProxyConfigured,

    #[error("Invalid proxy URI '{proxy}': {reason}")]
    InvalidProxyUri { proxy: String, reason: String },

    #[error("Invalid target URI '{0}': expected an absolute http or https URL")]
    InvalidTargetUri(String),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Connection error: {0}")]
    Transport(String),
}

impl CheckError {
    pub fn client_build(error: reqwest::Error) -> Self {
        Self::ClientBuild(describe_error_chain(&error))
    }

    pub fn transport(error: &(dyn StdError + 'static)) -> Self {
        Self::Transport(describe_error_chain(error))
    }
}

/// Result type for proxy check operations
pub type CheckResult<T> = Result<T, CheckError>;

/// Render an error and its sources as one line, skipping causes whose text
/// already appears earlier in the chain
pub fn describe_error_chain(error: &(dyn StdError + 'static)) -> String {
    let mut description = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        let text = cause.to_string();
        if !text.is_empty() && !description.contains(&text) {
            description.push_str(": ");
            description.push_str(&text);
        }
        source = cause.source();
    }

    description
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("outer failure")]
    struct Outer(#[source] Inner);

    #[derive(Debug, Error)]
    #[error("connection refused")]
    struct Inner;

    #[test]
    fn test_target_url_accepts_http_and_https() {
        assert!(TargetUrl::parse("http://example.com/status").is_ok());
        assert!(TargetUrl::parse("https://example.com").is_ok());
    }

    #[test]
    fn test_target_url_rejects_other_inputs() {
        for raw in ["", "example.com", "ftp://example.com", "mailto:ops@example.com"] {
            let error = TargetUrl::parse(raw).unwrap_err();
            assert!(matches!(error, CheckError::InvalidTargetUri(ref uri) if uri == raw));
        }
    }

    #[test]
    fn test_success_outcome_has_no_error() {
        let result = ProxyResult::from_outcome(
            "http://example.com",
            ExecutionOutcome::success(StatusCode::OK),
            ProbeRoute::Direct,
        );

        assert_eq!(result.status_code(), 200);
        assert_eq!(result.error(), None);
        assert_eq!(result.body_length(), 0);
        assert!(!result.via_proxy());
        assert_eq!(result.proxy_url(), None);
    }

    #[test]
    fn test_failure_outcome_captures_body_length_in_bytes() {
        let result = ProxyResult::from_outcome(
            "http://example.com",
            ExecutionOutcome::failure(StatusCode::FORBIDDEN, "dénié".to_string()),
            ProbeRoute::Proxy {
                redacted_url: "http://proxy:3128/".to_string(),
            },
        );

        assert_eq!(result.status_code(), 403);
        assert_eq!(result.error(), Some("dénié"));
        assert_eq!(result.body_length(), 7);
        assert!(result.via_proxy());
        assert_eq!(result.proxy_url(), Some("http://proxy:3128/"));
    }

    #[test]
    fn test_proxy_failure_result_uses_sentinel_status() {
        let error = CheckError::Transport("tcp connect error".to_string());
        let result = ProxyResult::from_proxy_failure("http://example.com", &error, "http://proxy/");

        assert_eq!(result.status_code(), STATUS_INTERNAL_ERROR);
        assert_eq!(result.error(), Some("Connection error: tcp connect error"));
        assert_eq!(result.body_length(), 0);
        assert!(result.via_proxy());
    }

    #[test]
    fn test_result_serializes_with_camel_case_fields() {
        let result = ProxyResult::from_outcome(
            "http://example.com/missing",
            ExecutionOutcome::failure(StatusCode::NOT_FOUND, "not found".to_string()),
            ProbeRoute::Direct,
        );

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "uri": "http://example.com/missing",
                "statusCode": 404,
                "error": "not found",
                "bodyLength": 9,
                "viaProxy": false
            })
        );
    }

    #[test]
    fn test_describe_error_chain_joins_sources() {
        let error = Outer(Inner);
        assert_eq!(
            describe_error_chain(&error),
            "outer failure: connection refused"
        );
    }
}
