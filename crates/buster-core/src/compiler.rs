//! Report compilation
//!
//! Turns a window of raw chat messages into a [`ReportDocument`], invoking
//! the evidence extractor once per message. Compilation always succeeds
//! structurally; schema problems are deferred to the validation gate.

use std::sync::Arc;

use tracing::debug;

use crate::evidence::{EvidenceExtractor, EvidenceFetcher};
use crate::report::{CompiledMessage, RawMessage, ReportDocument};

/// Assembles report documents from raw message windows.
pub struct ReportCompiler {
    extractor: EvidenceExtractor,
}

impl ReportCompiler {
    pub fn new(fetcher: Arc<dyn EvidenceFetcher>) -> Self {
        ReportCompiler {
            extractor: EvidenceExtractor::new(fetcher),
        }
    }

    /// Compile the messages in order into a report document.
    ///
    /// Output order matches input order, one compiled message per input.
    /// The only effects are the evidence fetches performed transitively by
    /// the extractor, and those are isolated per URL.
    pub async fn compile(&self, messages: &[RawMessage]) -> ReportDocument {
        let mut compiled = Vec::with_capacity(messages.len());
        for message in messages {
            let evidence = self.extractor.extract(&message.content).await;
            debug!(
                author = %message.author,
                evidence_count = evidence.len(),
                "message compiled"
            );
            compiled.push(CompiledMessage {
                author: message.author.clone(),
                timestamp: message.timestamp.clone(),
                content: message.content.clone(),
                evidence,
            });
        }
        ReportDocument { messages: compiled }
    }
}
