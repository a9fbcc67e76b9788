//! Proxy check module
//!
//! This module implements the probing engine and its HTTP surface:
//! - Resolution: which proxy a call uses and which credentials it presents
//! - Execution: a fresh client per call, one GET, one normalized result

pub mod client_builder;
pub mod credentials;
pub mod error_response;
pub mod executor;
pub mod headers;
pub mod middleware;
pub mod middleware_stack;
pub mod redaction;
pub mod routes;
pub mod service;
pub mod types;

pub use credentials::{CredentialResolver, CredentialSource, FallbackCredentials, ProxyCredentials};
pub use redaction::{redact_uri, redact_url};
pub use service::{ConnectivityChecker, ProxyCheckService, ProxyCheckSettings};
pub use types::{CheckError, CheckResult, ProxyResult, TargetUrl};
