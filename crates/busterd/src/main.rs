//! Pipe-driven front end for the report pipeline.
//!
//! Reads a JSON array of chat messages on stdin (the bounded window a
//! chat-platform client would hand over), runs the compile → validate →
//! score pipeline, and prints the scored result as JSON on stdout.
//! With `--submit`, the validated report is also sent to the endpoint
//! configured via `OFAC_API_URL`.
//!
//! The chat-platform client itself is an external collaborator; this
//! binary is the process bootstrap (env config, tracing) plus the
//! thinnest possible trigger surface.

use std::io::Read;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use tracing::error;

use buster_core::{telemetry, BusterConfig, Orchestrator, RawMessage};

#[derive(Parser, Debug)]
#[command(name = "busterd", about = "Compile and submit compliance reports")]
struct Args {
    /// Submit the validated report to the configured endpoint.
    #[arg(long)]
    submit: bool,

    /// Emit plain-text log lines instead of JSON.
    #[arg(long)]
    plain_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    telemetry::init_tracing(!args.plain_logs);

    let config = BusterConfig::from_env();
    let orchestrator =
        Orchestrator::from_config(&config).context("failed to wire report pipeline")?;

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;
    let messages = parse_messages(&input).context("stdin is not a JSON array of messages")?;

    let scored = match orchestrator.handle_report_request(&messages).await {
        Ok(scored) => scored,
        Err(e) => {
            error!(error = %e, "report request failed");
            return Err(e.into());
        }
    };

    if args.submit {
        if let Err(e) = orchestrator.submit_report(&scored.report).await {
            error!(error = %e, "submission failed");
            return Err(e.into());
        }
    }

    println!("{}", serde_json::to_string_pretty(&scored)?);
    Ok(())
}

/// Parse the message window. Each entry's fields are read defensively;
/// a malformed entry becomes a message with empty fields rather than an
/// error (the schema gate catches genuinely broken input downstream).
fn parse_messages(input: &str) -> Result<Vec<RawMessage>> {
    let values: Vec<Value> = serde_json::from_str(input)?;
    Ok(values.iter().map(RawMessage::from_value).collect())
}
