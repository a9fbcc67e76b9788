//! Issues probe requests and captures their outcome

use crate::proxy::types::{CheckError, CheckResult, ExecutionOutcome, TargetUrl};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Sends a single GET with a prepared client
#[derive(Clone, Copy, Debug)]
pub struct RequestExecutor {
    timeout: Duration,
}

impl RequestExecutor {
    /// `timeout` is the bound already configured on the clients this executor
    /// is handed; it is only used to describe timeout failures
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// GET `target`, reading the body only when the status is not 2xx
    pub async fn execute(&self, client: &Client, target: &TargetUrl) -> CheckResult<ExecutionOutcome> {
        let url: &str = target.as_ref();
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if status.is_success() {
            debug!(status = status.as_u16(), "Target answered successfully");
            return Ok(ExecutionOutcome::success(status));
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;

        debug!(
            status = status.as_u16(),
            body_length = body.len(),
            "Target answered with an error status"
        );
        Ok(ExecutionOutcome::failure(status, body))
    }

    fn transport_error(&self, error: reqwest::Error) -> CheckError {
        if error.is_timeout() {
            CheckError::Timeout(self.timeout)
        } else {
            CheckError::transport(&error)
        }
    }
}
