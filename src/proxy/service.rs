//! Connectivity check service
//!
//! The `ProxyCheckService` is the main entry point of the checker. It decides
//! which proxy (if any) a probe uses, builds a fresh client for that probe,
//! executes it and folds the outcome into a [`ProxyResult`].
//!
//! ## Failure policy
//!
//! The two entry points deliberately differ:
//!
//! - **`call_proxy`**: once a proxy address is known, every failure (bad proxy
//!   URI, unreachable proxy, timeout, ...) is reported inside the result with
//!   status 500. Only "no proxy configured" is returned as an error.
//! - **`call_direct`**: transport failures are returned as errors, since a
//!   broken direct path is itself the signal being diagnosed.
//!
//! ```rust,ignore
//! use network_checker::proxy::{ConnectivityChecker, ProxyCheckService, ProxyCheckSettings};
//!
//! let service = ProxyCheckService::new(ProxyCheckSettings::default());
//! let result = service
//!     .call_proxy("https://example.com", Some("http://proxy.internal:3128"))
//!     .await?;
//! println!("{} via {:?}", result.status_code(), result.proxy_url());
//! ```

use crate::proxy::client_builder::{ClientTimeouts, ProxyClientBuilder};
use crate::proxy::credentials::{CredentialResolver, FallbackCredentials};
use crate::proxy::executor::RequestExecutor;
use crate::proxy::redaction::redact_uri;
use crate::proxy::types::*;
use async_trait::async_trait;
use std::fmt;
use tracing::{info, instrument, warn};
use url::Url;

/// Operations offered to the HTTP surface
#[async_trait]
pub trait ConnectivityChecker: Send + Sync {
    /// Probe `uri` through `explicit_proxy`, or the configured fallback proxy
    async fn call_proxy(&self, uri: &str, explicit_proxy: Option<&str>) -> CheckResult<ProxyResult>;

    /// Probe `uri` without any proxy
    async fn call_direct(&self, uri: &str) -> CheckResult<ProxyResult>;
}

/// Plain configuration values the service is constructed from
#[derive(Clone, Default)]
pub struct ProxyCheckSettings {
    /// Proxy used when a call does not name one
    pub fallback_proxy: Option<String>,
    /// Credentials used when the proxy URI carries none
    pub fallback_credentials: FallbackCredentials,
    pub timeouts: ClientTimeouts,
}

impl fmt::Debug for ProxyCheckSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyCheckSettings")
            .field(
                "fallback_proxy",
                &self.fallback_proxy.as_deref().map(redact_uri),
            )
            .field("fallback_credentials", &self.fallback_credentials)
            .field("timeouts", &self.timeouts)
            .finish()
    }
}

/// Resolves, builds and executes connectivity probes
#[derive(Clone)]
pub struct ProxyCheckService {
    fallback_proxy: Option<String>,
    credentials: CredentialResolver,
    client_builder: ProxyClientBuilder,
    executor: RequestExecutor,
}

impl ProxyCheckService {
    pub fn new(settings: ProxyCheckSettings) -> Self {
        let fallback_proxy = settings
            .fallback_proxy
            .map(|proxy| proxy.trim().to_string())
            .filter(|proxy| !proxy.is_empty());

        Self {
            fallback_proxy,
            credentials: CredentialResolver::new(settings.fallback_credentials),
            client_builder: ProxyClientBuilder::new(settings.timeouts),
            executor: RequestExecutor::new(settings.timeouts.request),
        }
    }

    /// Explicit proxy if one was given, else the configured fallback
    fn resolve_proxy(&self, explicit_proxy: Option<&str>) -> Option<String> {
        explicit_proxy
            .map(str::trim)
            .filter(|proxy| !proxy.is_empty())
            .map(str::to_string)
            .or_else(|| self.fallback_proxy.clone())
    }

    /// Parse the proxy, resolve its credentials, build a client and execute
    async fn probe_via_proxy(&self, uri: &str, proxy: &str) -> CheckResult<ExecutionOutcome> {
        let target = TargetUrl::parse(uri)?;
        let proxy_url = Url::parse(proxy).map_err(|e| CheckError::InvalidProxyUri {
            proxy: redact_uri(proxy),
            reason: e.to_string(),
        })?;
        if proxy_url.cannot_be_a_base() || !proxy_url.has_host() {
            return Err(CheckError::InvalidProxyUri {
                proxy: redact_uri(proxy),
                reason: "expected scheme://host:port".to_string(),
            });
        }

        let resolution = self.credentials.resolve(&proxy_url);
        let client = self
            .client_builder
            .proxied(&proxy_url, resolution.credentials.as_ref())?;

        info!(uri, "Calling target via the proxy");
        self.executor.execute(&client, &target).await
    }
}

impl fmt::Debug for ProxyCheckService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyCheckService")
            .field(
                "fallback_proxy",
                &self.fallback_proxy.as_deref().map(redact_uri),
            )
            .field("credentials", &self.credentials)
            .field("client_builder", &self.client_builder)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ConnectivityChecker for ProxyCheckService {
    #[instrument(skip(self, explicit_proxy))]
    async fn call_proxy(&self, uri: &str, explicit_proxy: Option<&str>) -> CheckResult<ProxyResult> {
        let proxy = self
            .resolve_proxy(explicit_proxy)
            .ok_or(CheckError::NoProxyConfigured)?;

        let redacted = redact_uri(&proxy);
        info!(proxy = %redacted, "Setting up the proxy");

        match self.probe_via_proxy(uri, &proxy).await {
            Ok(outcome) => {
                info!(
                    proxy = %redacted,
                    status = outcome.status().as_u16(),
                    "Proxied call completed"
                );
                Ok(ProxyResult::from_outcome(
                    uri,
                    outcome,
                    ProbeRoute::Proxy {
                        redacted_url: redacted,
                    },
                ))
            }
            Err(error) => {
                warn!(proxy = %redacted, error = %error, "Proxied call failed");
                Ok(ProxyResult::from_proxy_failure(uri, &error, redacted))
            }
        }
    }

    #[instrument(skip(self))]
    async fn call_direct(&self, uri: &str) -> CheckResult<ProxyResult> {
        let target = TargetUrl::parse(uri)?;
        let client = self.client_builder.direct()?;

        info!(uri, "Calling target direct");
        let outcome = self.executor.execute(&client, &target).await?;

        info!(status = outcome.status().as_u16(), "Direct call completed");
        Ok(ProxyResult::from_outcome(uri, outcome, ProbeRoute::Direct))
    }
}
