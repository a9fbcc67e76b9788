//! Per-call HTTP client construction
//!
//! Every probe gets its own client. Nothing is pooled between calls, so a bad
//! proxy credential or a stale connection in one call cannot leak into another.

use crate::proxy::credentials::ProxyCredentials;
use crate::proxy::types::{CheckError, CheckResult, USER_AGENT};
use reqwest::{Client, ClientBuilder, Proxy};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Timeouts applied to every probe client
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClientTimeouts {
    /// Upper bound for the whole exchange, body included
    pub request: Duration,
    pub connect: Duration,
}

impl Default for ClientTimeouts {
    fn default() -> Self {
        Self {
            request: Duration::from_secs(30),
            connect: Duration::from_secs(10),
        }
    }
}

/// Builds single-use clients in direct or proxied mode
#[derive(Clone, Debug, Default)]
pub struct ProxyClientBuilder {
    timeouts: ClientTimeouts,
}

impl ProxyClientBuilder {
    pub fn new(timeouts: ClientTimeouts) -> Self {
        Self { timeouts }
    }

    /// A client that never routes through a proxy, ignoring `HTTP_PROXY` and friends
    pub fn direct(&self) -> CheckResult<Client> {
        self.base().no_proxy().build().map_err(CheckError::client_build)
    }

    /// A client that sends every request through `proxy`
    ///
    /// Any user-info on `proxy` is dropped; authentication uses `credentials` only.
    pub fn proxied(
        &self,
        proxy: &Url,
        credentials: Option<&ProxyCredentials>,
    ) -> CheckResult<Client> {
        let endpoint = without_user_info(proxy);
        let mut proxy = Proxy::all(endpoint.as_str()).map_err(CheckError::client_build)?;

        if let Some(credentials) = credentials {
            proxy = proxy.basic_auth(credentials.username(), credentials.password());
        }

        debug!(
            proxy = endpoint.as_str(),
            authenticated = credentials.is_some(),
            "Building proxied client"
        );

        self.base()
            .proxy(proxy)
            .build()
            .map_err(CheckError::client_build)
    }

    fn base(&self) -> ClientBuilder {
        Client::builder()
            .user_agent(USER_AGENT)
            .timeout(self.timeouts.request)
            .connect_timeout(self.timeouts.connect)
            .pool_max_idle_per_host(0)
    }
}

fn without_user_info(url: &Url) -> Url {
    let mut endpoint = url.clone();
    // Only fails for URLs without a host, which reqwest rejects anyway
    let _ = endpoint.set_username("");
    let _ = endpoint.set_password(None);
    endpoint
}
