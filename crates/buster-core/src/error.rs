//! Error types for the report pipeline

use thiserror::Error;

/// Errors that can occur while compiling, validating, or submitting a report.
#[derive(Error, Debug)]
pub enum ReportError {
    /// The compiled or supplied report does not conform to the report schema.
    /// Callers must not proceed to submission.
    #[error("report failed schema validation")]
    InvalidReport,

    /// No submission endpoint is configured. Raised before any network attempt.
    #[error("submission endpoint is not configured (set OFAC_API_URL)")]
    MissingEndpoint,

    /// The submission endpoint answered with a non-2xx status.
    #[error("submission rejected with HTTP status {status}")]
    Submission { status: u16 },

    /// Network-level failure while talking to the submission endpoint.
    #[error("submission transport failed: {0}")]
    Transport(String),

    /// Report could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The report schema artifact failed to compile.
    #[error("schema compilation failed: {0}")]
    Schema(String),
}

/// Result type for report pipeline operations
pub type Result<T> = std::result::Result<T, ReportError>;
