//! Pipeline orchestration
//!
//! Sequences the two report operations:
//!
//! - handle-report-request: compile → validate → score
//! - submit-report: re-validate → submission gateway
//!
//! Validation is the safety gate: a document that fails it never reaches
//! the regulator-facing endpoint. Each transition emits a structured
//! tracing event tagged with a request id; the events form the audit
//! trail and never drive control flow.

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::compiler::ReportCompiler;
use crate::config::BusterConfig;
use crate::error::{ReportError, Result};
use crate::evidence::{EvidenceFetcher, HttpFetcher};
use crate::report::{RawMessage, ReportDocument, ScoredResult};
use crate::scorer::ReportScorer;
use crate::submit::{HttpTransport, SubmissionGateway, SubmissionTransport};
use crate::validator::SchemaValidator;

/// Coordinates compilation, validation, scoring, and submission.
pub struct Orchestrator {
    compiler: ReportCompiler,
    validator: SchemaValidator,
    gateway: SubmissionGateway,
}

impl Orchestrator {
    pub fn new(
        compiler: ReportCompiler,
        validator: SchemaValidator,
        gateway: SubmissionGateway,
    ) -> Self {
        Orchestrator {
            compiler,
            validator,
            gateway,
        }
    }

    /// Wire an orchestrator with explicit transports. Entry point for
    /// tests and embedders supplying fakes.
    pub fn with_transports(
        config: &BusterConfig,
        fetcher: Arc<dyn EvidenceFetcher>,
        transport: Arc<dyn SubmissionTransport>,
    ) -> Result<Self> {
        Ok(Orchestrator {
            compiler: ReportCompiler::new(fetcher),
            validator: SchemaValidator::new()?,
            gateway: SubmissionGateway::new(transport, config.submission_endpoint.clone()),
        })
    }

    /// Wire an orchestrator over HTTP transports from configuration.
    pub fn from_config(config: &BusterConfig) -> Result<Self> {
        let fetcher = Arc::new(HttpFetcher::new(config.evidence_timeout));
        let transport = Arc::new(HttpTransport::new(config.submission_timeout));
        Self::with_transports(config, fetcher, transport)
    }

    /// Compile the message window into a report, gate it on the schema,
    /// and score it.
    ///
    /// Fails with [`ReportError::InvalidReport`] when the compiled
    /// document does not conform; no score is produced in that case and
    /// the caller must not proceed to submission.
    pub async fn handle_report_request(&self, messages: &[RawMessage]) -> Result<ScoredResult> {
        let request_id = Uuid::new_v4();
        info!(
            request_id = %request_id,
            message_count = messages.len(),
            "report request received"
        );

        let report = self.compiler.compile(messages).await;
        let doc = serde_json::to_value(&report)?;
        debug!(request_id = %request_id, report = %doc, "report compiled");

        if !self.validator.is_valid(&doc) {
            warn!(request_id = %request_id, "compiled report failed validation");
            return Err(ReportError::InvalidReport);
        }

        let score = ReportScorer::score(&report);
        info!(request_id = %request_id, score, "report validated and scored");

        Ok(ScoredResult { report, score })
    }

    /// Submit a report believed already valid.
    ///
    /// The document is re-validated defensively first; a non-conformant
    /// report fails with [`ReportError::InvalidReport`] and the transport
    /// is never invoked.
    pub async fn submit_report(&self, report: &ReportDocument) -> Result<bool> {
        if !self.validator.is_valid_report(report)? {
            warn!("report failed pre-submission validation");
            return Err(ReportError::InvalidReport);
        }

        info!(
            endpoint = self.gateway.endpoint().unwrap_or("<unconfigured>"),
            message_count = report.message_count(),
            "submitting report"
        );
        self.gateway.submit(report).await
    }
}
