//! Buster core library
//!
//! Turns a window of raw chat messages into a structured, schema-conformant
//! compliance report, attaches fetched evidence for referenced URLs, scores
//! the report for completeness, and gates submission on validation:
//!
//! - [`evidence`]: URL discovery and per-URL fetching with local failure
//!   recovery
//! - [`compiler`]: order-preserving assembly of the report document
//! - [`validator`]: the schema gate (boolean verdict only)
//! - [`scorer`]: completeness scoring
//! - [`orchestrator`]: sequencing and failure gating for both operations
//! - [`submit`]: the submission gateway
//!
//! Transports are capability traits ([`evidence::EvidenceFetcher`],
//! [`submit::SubmissionTransport`]); in-memory fakes live in [`fakes`].

pub mod compiler;
pub mod config;
pub mod error;
pub mod evidence;
pub mod fakes;
pub mod orchestrator;
pub mod report;
pub mod scorer;
pub mod submit;
pub mod telemetry;
pub mod validator;

pub use compiler::ReportCompiler;
pub use config::BusterConfig;
pub use error::{ReportError, Result};
pub use evidence::{EvidenceExtractor, EvidenceFetcher, FetchError, HttpFetcher};
pub use orchestrator::Orchestrator;
pub use report::{CompiledMessage, EvidenceItem, RawMessage, ReportDocument, ScoredResult};
pub use scorer::ReportScorer;
pub use submit::{HttpTransport, SubmissionGateway, SubmissionTransport};
pub use validator::SchemaValidator;

/// Buster core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
