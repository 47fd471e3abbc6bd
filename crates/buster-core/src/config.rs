//! Environment configuration
//!
//! All configuration is read once at startup; nothing is re-read during
//! the process lifetime.

use std::time::Duration;

use crate::evidence::DEFAULT_FETCH_TIMEOUT;
use crate::submit::DEFAULT_SUBMIT_TIMEOUT;

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct BusterConfig {
    /// Destination submission endpoint (`OFAC_API_URL`). Optional at
    /// load; submission fails with `MissingEndpoint` without it.
    pub submission_endpoint: Option<String>,

    /// Per-URL evidence fetch timeout (`BUSTER_EVIDENCE_TIMEOUT_SECS`).
    pub evidence_timeout: Duration,

    /// Submission POST timeout (`BUSTER_SUBMIT_TIMEOUT_SECS`).
    pub submission_timeout: Duration,
}

impl Default for BusterConfig {
    fn default() -> Self {
        BusterConfig {
            submission_endpoint: None,
            evidence_timeout: DEFAULT_FETCH_TIMEOUT,
            submission_timeout: DEFAULT_SUBMIT_TIMEOUT,
        }
    }
}

impl BusterConfig {
    /// Read configuration from environment variables.
    pub fn from_env() -> Self {
        BusterConfig {
            submission_endpoint: std::env::var("OFAC_API_URL").ok(),
            evidence_timeout: timeout_from_env("BUSTER_EVIDENCE_TIMEOUT_SECS", DEFAULT_FETCH_TIMEOUT),
            submission_timeout: timeout_from_env("BUSTER_SUBMIT_TIMEOUT_SECS", DEFAULT_SUBMIT_TIMEOUT),
        }
    }

    /// Set the submission endpoint.
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.submission_endpoint = Some(endpoint.to_string());
        self
    }
}

fn timeout_from_env(key: &str, default: Duration) -> Duration {
    std::env::var(key)
        .ok()
        .and_then(|raw| parse_secs(&raw))
        .unwrap_or(default)
}

fn parse_secs(raw: &str) -> Option<Duration> {
    raw.trim().parse::<u64>().ok().map(Duration::from_secs)
}
