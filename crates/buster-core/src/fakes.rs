//! In-memory fakes for the transport traits (testing only)
//!
//! Provides `MemoryFetcher` and `RecordingTransport` that satisfy the
//! capability contracts without touching the network.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{ReportError, Result};
use crate::evidence::{EvidenceFetcher, FetchError};
use crate::submit::SubmissionTransport;

// ---------------------------------------------------------------------------
// MemoryFetcher
// ---------------------------------------------------------------------------

/// In-memory evidence fetcher backed by a `HashMap<url, body>`.
///
/// URLs listed via [`MemoryFetcher::with_failure`] fail with a connection
/// error; URLs with no registered body fail as 404.
#[derive(Debug, Default)]
pub struct MemoryFetcher {
    bodies: HashMap<String, String>,
    failures: HashSet<String>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a body served for `url`.
    pub fn with_body(mut self, url: &str, body: &str) -> Self {
        self.bodies.insert(url.to_string(), body.to_string());
        self
    }

    /// Make fetches of `url` fail with a connection error.
    pub fn with_failure(mut self, url: &str) -> Self {
        self.failures.insert(url.to_string());
        self
    }
}

#[async_trait]
impl EvidenceFetcher for MemoryFetcher {
    async fn fetch(&self, url: &str) -> std::result::Result<String, FetchError> {
        if self.failures.contains(url) {
            return Err(FetchError::Request("connection refused".to_string()));
        }
        self.bodies
            .get(url)
            .cloned()
            .ok_or(FetchError::Status(404))
    }
}

// ---------------------------------------------------------------------------
// RecordingTransport
// ---------------------------------------------------------------------------

/// One observed submission call.
#[derive(Debug, Clone)]
pub struct RecordedPost {
    pub endpoint: String,
    pub body: Value,
}

/// Submission transport that records every call and answers with a fixed
/// status, or a transport error when constructed via
/// [`RecordingTransport::failing`].
#[derive(Debug)]
pub struct RecordingTransport {
    status: Option<u16>,
    calls: Mutex<Vec<RecordedPost>>,
}

impl RecordingTransport {
    /// Transport that always answers `status`.
    pub fn with_status(status: u16) -> Self {
        RecordingTransport {
            status: Some(status),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Transport whose every call fails at the network level.
    pub fn failing() -> Self {
        RecordingTransport {
            status: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Calls observed so far.
    pub fn calls(&self) -> Vec<RecordedPost> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls observed so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl SubmissionTransport for RecordingTransport {
    async fn post_json(&self, endpoint: &str, body: &Value) -> Result<u16> {
        self.calls.lock().unwrap().push(RecordedPost {
            endpoint: endpoint.to_string(),
            body: body.clone(),
        });
        self.status
            .ok_or_else(|| ReportError::Transport("connection reset".to_string()))
    }
}
