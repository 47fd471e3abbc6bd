//! Report submission gateway
//!
//! Sends a validated report to the configured compliance endpoint with a
//! single JSON POST. No retries, no backoff, no idempotency key.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use crate::error::{ReportError, Result};
use crate::report::ReportDocument;

/// Default submission POST timeout.
pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Capability to POST a JSON body and observe the response status.
///
/// The real implementation is [`HttpTransport`]; tests use
/// `fakes::RecordingTransport`.
#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    /// POST `body` to `endpoint` and return the HTTP status code.
    async fn post_json(&self, endpoint: &str, body: &Value) -> Result<u16>;
}

/// HTTP submission transport with a fixed request timeout.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("buster-core/0.1.0")
            .build()
            .expect("Failed to create HTTP client");
        HttpTransport { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(DEFAULT_SUBMIT_TIMEOUT)
    }
}

#[async_trait]
impl SubmissionTransport for HttpTransport {
    async fn post_json(&self, endpoint: &str, body: &Value) -> Result<u16> {
        let response = self
            .client
            .post(endpoint)
            .json(body)
            .send()
            .await
            .map_err(|e| ReportError::Transport(e.to_string()))?;
        Ok(response.status().as_u16())
    }
}

/// Submits report documents to the configured destination endpoint.
pub struct SubmissionGateway {
    transport: Arc<dyn SubmissionTransport>,
    endpoint: Option<String>,
}

impl SubmissionGateway {
    pub fn new(transport: Arc<dyn SubmissionTransport>, endpoint: Option<String>) -> Self {
        SubmissionGateway {
            transport,
            endpoint,
        }
    }

    /// The configured destination endpoint, if any.
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// Submit a report document.
    ///
    /// Fails with [`ReportError::MissingEndpoint`] before any network
    /// attempt when no endpoint is configured, and with
    /// [`ReportError::Submission`] on any non-2xx response. The intake
    /// only ever answers 200 on acceptance, so other 2xx codes are not
    /// treated as acceptance.
    pub async fn submit(&self, report: &ReportDocument) -> Result<bool> {
        let endpoint = self
            .endpoint
            .as_deref()
            .ok_or(ReportError::MissingEndpoint)?;

        let body = serde_json::to_value(report)?;
        let status = self.transport.post_json(endpoint, &body).await?;

        if !(200..300).contains(&status) {
            return Err(ReportError::Submission { status });
        }

        info!(endpoint = %endpoint, status, "report submitted");
        Ok(status == 200)
    }
}
