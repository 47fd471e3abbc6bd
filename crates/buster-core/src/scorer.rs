//! Report completeness scoring.

use crate::report::ReportDocument;

/// Completeness scoring rules.
///
/// The current formula is the message count: deterministic, non-negative,
/// monotonic in the number of captured messages. Richer formulas (evidence
/// completeness, narrative section presence) can replace it without
/// breaking callers.
pub struct ReportScorer;

impl ReportScorer {
    /// Score a report document.
    pub fn score(report: &ReportDocument) -> u64 {
        report.messages.len() as u64
    }
}
