//! URL evidence extraction
//!
//! Scans message text for embedded URLs and retrieves each one through an
//! [`EvidenceFetcher`]. A failed fetch is recorded inside the evidence item
//! as `"ERROR: <cause>"` and never aborts the surrounding compilation.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::report::EvidenceItem;

/// URLs are any `http://` or `https://` run of non-whitespace characters.
const URL_PATTERN: &str = r"https?://\S+";

/// Default per-URL fetch timeout.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// A failed evidence fetch. Every failure class (timeout, connection,
/// non-2xx status) collapses into one of these; callers only ever embed
/// the message into the evidence item.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("status {0}")]
    Status(u16),
}

/// Capability to fetch the text body at a URL.
///
/// The real implementation is [`HttpFetcher`]; tests use
/// `fakes::MemoryFetcher`.
#[async_trait]
pub trait EvidenceFetcher: Send + Sync {
    /// Retrieve the text body at `url`, or a typed failure.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// HTTP evidence fetcher with a fixed per-request timeout.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher with the given per-request timeout.
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("buster-core/0.1.0")
            .build()
            .expect("Failed to create HTTP client");
        HttpFetcher { client }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_FETCH_TIMEOUT)
    }
}

#[async_trait]
impl EvidenceFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))
    }
}

/// Finds URLs in message text and attaches their fetched content.
pub struct EvidenceExtractor {
    fetcher: Arc<dyn EvidenceFetcher>,
    url_pattern: Regex,
}

impl EvidenceExtractor {
    pub fn new(fetcher: Arc<dyn EvidenceFetcher>) -> Self {
        EvidenceExtractor {
            fetcher,
            url_pattern: Regex::new(URL_PATTERN).expect("valid URL pattern"),
        }
    }

    /// Extract one evidence item per URL match in `content`.
    ///
    /// Matches are visited left to right and duplicates are kept, so the
    /// returned items line up one-to-one with the URL occurrences in the
    /// text. URLs are fetched sequentially, one request in flight at a
    /// time; each fetch failure is absorbed into its own item.
    pub async fn extract(&self, content: &str) -> Vec<EvidenceItem> {
        let mut items = Vec::new();
        for found in self.url_pattern.find_iter(content) {
            let url = found.as_str();
            let content = match self.fetcher.fetch(url).await {
                Ok(body) => body,
                Err(e) => {
                    debug!(url = %url, error = %e, "evidence fetch failed");
                    format!("{}{}", EvidenceItem::ERROR_PREFIX, e)
                }
            };
            items.push(EvidenceItem {
                url: url.to_string(),
                content,
            });
        }
        items
    }
}
