//! Report domain model
//!
//! Plain serde-derived values. A [`ReportDocument`] is treated as an
//! immutable value once compiled: rebuild it, never patch it in place.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A raw chat message as handed over by the chat-platform front end.
///
/// Fields default to empty strings on deserialization; a message with a
/// missing field compiles fine and is caught later by the schema gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMessage {
    #[serde(default)]
    pub author: String,

    #[serde(default)]
    pub timestamp: String,

    #[serde(default)]
    pub content: String,
}

impl RawMessage {
    pub fn new(author: &str, timestamp: &str, content: &str) -> Self {
        RawMessage {
            author: author.to_string(),
            timestamp: timestamp.to_string(),
            content: content.to_string(),
        }
    }

    /// Read a message out of untyped JSON. Absent or non-string fields
    /// become empty strings; this never fails.
    pub fn from_value(value: &Value) -> Self {
        let field = |name: &str| {
            value
                .get(name)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        RawMessage {
            author: field("author"),
            timestamp: field("timestamp"),
            content: field("content"),
        }
    }
}

/// Text retrieved from one URL referenced inside a message.
///
/// `content` is either the fetched body or the sentinel
/// `"ERROR: <cause>"` when the fetch failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceItem {
    pub url: String,
    pub content: String,
}

impl EvidenceItem {
    /// Marker prefix used for failed fetches.
    pub const ERROR_PREFIX: &'static str = "ERROR: ";

    /// Whether this item records a failed fetch.
    pub fn is_error(&self) -> bool {
        self.content.starts_with(Self::ERROR_PREFIX)
    }
}

/// One compiled message: the raw fields plus its attached evidence.
///
/// `evidence` holds one item per URL match in `content`, duplicates
/// preserved, in first-occurrence order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledMessage {
    pub author: String,
    pub timestamp: String,
    pub content: String,
    pub evidence: Vec<EvidenceItem>,
}

/// The structured aggregate submitted to the compliance endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDocument {
    pub messages: Vec<CompiledMessage>,
}

impl ReportDocument {
    /// Number of compiled messages in the report.
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}

/// Return value of the compile path: the report plus its completeness score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredResult {
    pub report: ReportDocument,
    pub score: u64,
}
