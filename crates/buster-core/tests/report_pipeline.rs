//! Integration tests for the report pipeline with in-memory fakes.

use std::sync::Arc;

use buster_core::fakes::{MemoryFetcher, RecordingTransport};
use buster_core::{
    BusterConfig, Orchestrator, RawMessage, ReportError, SchemaValidator, ReportCompiler,
    SubmissionGateway,
};
use serde_json::json;

fn config() -> BusterConfig {
    BusterConfig::default().with_endpoint("http://intake.example/reports")
}

/// Test: a message referencing a URL compiles into the documented shape.
#[tokio::test]
async fn test_compile_attaches_fetched_evidence() {
    let fetcher = MemoryFetcher::new().with_body("http://example.com", "fetched");
    let transport = Arc::new(RecordingTransport::with_status(200));
    let orch = Orchestrator::with_transports(&config(), Arc::new(fetcher), transport)
        .expect("wire orchestrator");

    let messages = vec![RawMessage::new("a", "t", "see http://example.com")];
    let scored = orch.handle_report_request(&messages).await.expect("pipeline failed");

    assert_eq!(scored.score, 1);
    let doc = serde_json::to_value(&scored.report).unwrap();
    assert_eq!(
        doc,
        json!({
            "messages": [{
                "author": "a",
                "timestamp": "t",
                "content": "see http://example.com",
                "evidence": [{ "url": "http://example.com", "content": "fetched" }]
            }]
        })
    );
}

/// Test: a message without URLs compiles with empty evidence.
#[tokio::test]
async fn test_compile_without_urls_has_empty_evidence() {
    let transport = Arc::new(RecordingTransport::with_status(200));
    let orch = Orchestrator::with_transports(
        &config(),
        Arc::new(MemoryFetcher::new()),
        transport,
    )
    .expect("wire orchestrator");

    let messages = vec![RawMessage::new("a", "t", "hello")];
    let scored = orch.handle_report_request(&messages).await.expect("pipeline failed");

    assert!(scored.report.messages[0].evidence.is_empty());
    assert_eq!(scored.score, 1);
}

/// Test: one failing URL is isolated; the rest of the report is unaffected.
#[tokio::test]
async fn test_failed_fetch_is_isolated_per_url() {
    let fetcher = MemoryFetcher::new()
        .with_failure("http://down.example")
        .with_body("http://up.example", "alive");
    let transport = Arc::new(RecordingTransport::with_status(200));
    let orch = Orchestrator::with_transports(&config(), Arc::new(fetcher), transport)
        .expect("wire orchestrator");

    let messages = vec![
        RawMessage::new("a", "t1", "http://down.example"),
        RawMessage::new("b", "t2", "http://up.example"),
    ];
    let scored = orch.handle_report_request(&messages).await.expect("pipeline failed");

    let down = &scored.report.messages[0].evidence[0];
    let up = &scored.report.messages[1].evidence[0];
    assert!(down.content.starts_with("ERROR: "));
    assert_eq!(up.content, "alive");
    assert_eq!(scored.score, 2);
}

/// Test: a validation failure stops the request before scoring and the
/// transport is never touched.
#[tokio::test]
async fn test_invalid_report_never_reaches_the_transport() {
    // A gate stricter than the shipped artifact, so the compiled document
    // fails it: reporter_id is mandatory here.
    let strict = SchemaValidator::from_value(&json!({
        "type": "object",
        "properties": {
            "messages": { "type": "array" },
            "reporter_id": { "type": "string" }
        },
        "required": ["messages", "reporter_id"]
    }))
    .expect("strict schema compiles");

    let transport = Arc::new(RecordingTransport::with_status(200));
    let compiler = ReportCompiler::new(Arc::new(MemoryFetcher::new()));
    let gateway = SubmissionGateway::new(
        transport.clone(),
        Some("http://intake.example/reports".to_string()),
    );
    let orch = Orchestrator::new(compiler, strict, gateway);

    let messages = vec![RawMessage::new("a", "t", "hello")];
    let err = orch.handle_report_request(&messages).await.unwrap_err();
    assert!(matches!(err, ReportError::InvalidReport));
    assert_eq!(transport.call_count(), 0, "transport must not be called");

    // The pre-submission gate blocks direct submission the same way.
    let report = ReportCompiler::new(Arc::new(MemoryFetcher::new()))
        .compile(&messages)
        .await;
    let err = orch.submit_report(&report).await.unwrap_err();
    assert!(matches!(err, ReportError::InvalidReport));
    assert_eq!(transport.call_count(), 0, "transport must not be called");
}

/// Test: submit-report succeeds on 200 and errors on 500.
#[tokio::test]
async fn test_submission_status_handling() {
    let messages = vec![RawMessage::new("a", "t", "hello")];

    let accepted = Arc::new(RecordingTransport::with_status(200));
    let orch = Orchestrator::with_transports(
        &config(),
        Arc::new(MemoryFetcher::new()),
        accepted.clone(),
    )
    .expect("wire orchestrator");
    let scored = orch.handle_report_request(&messages).await.expect("pipeline failed");
    assert!(orch.submit_report(&scored.report).await.unwrap());
    assert_eq!(accepted.call_count(), 1);

    let rejected = Arc::new(RecordingTransport::with_status(500));
    let orch = Orchestrator::with_transports(
        &config(),
        Arc::new(MemoryFetcher::new()),
        rejected,
    )
    .expect("wire orchestrator");
    let err = orch.submit_report(&scored.report).await.unwrap_err();
    assert!(matches!(err, ReportError::Submission { status: 500 }));
}

/// Test: submission without a configured endpoint fails fast.
#[tokio::test]
async fn test_unconfigured_endpoint_is_fatal() {
    let transport = Arc::new(RecordingTransport::with_status(200));
    let orch = Orchestrator::with_transports(
        &BusterConfig::default(),
        Arc::new(MemoryFetcher::new()),
        transport.clone(),
    )
    .expect("wire orchestrator");

    let scored = orch.handle_report_request(&[]).await.expect("pipeline failed");
    let err = orch.submit_report(&scored.report).await.unwrap_err();
    assert!(matches!(err, ReportError::MissingEndpoint));
    assert_eq!(transport.call_count(), 0);
}

/// Test: duplicate URLs are fetched independently, once per occurrence.
#[tokio::test]
async fn test_duplicate_urls_produce_duplicate_evidence() {
    let fetcher = MemoryFetcher::new().with_body("http://example.com", "fetched");
    let transport = Arc::new(RecordingTransport::with_status(200));
    let orch = Orchestrator::with_transports(&config(), Arc::new(fetcher), transport)
        .expect("wire orchestrator");

    let messages = vec![RawMessage::new(
        "a",
        "t",
        "http://example.com and again http://example.com",
    )];
    let scored = orch.handle_report_request(&messages).await.expect("pipeline failed");

    let evidence = &scored.report.messages[0].evidence;
    assert_eq!(evidence.len(), 2);
    assert_eq!(evidence[0].url, evidence[1].url);
}
