//! Schema validation gate
//!
//! Holds the compiled report schema as an explicitly constructed,
//! immutable value. The shipped artifact lives at
//! `schemas/report.schema.json` and is embedded at build time, so the
//! schema is loaded exactly once per validator and never hot-reloaded.
//!
//! Callers get a plain pass/fail verdict; engine diagnostics are
//! deliberately swallowed so every schema violation is treated uniformly.

use jsonschema::JSONSchema;
use serde_json::Value;

use crate::error::{ReportError, Result};
use crate::report::ReportDocument;

/// The canonical report schema artifact.
const REPORT_SCHEMA: &str = include_str!("../schemas/report.schema.json");

/// Validates report documents against the report schema.
pub struct SchemaValidator {
    compiled: JSONSchema,
}

impl SchemaValidator {
    /// Compile the embedded report schema.
    pub fn new() -> Result<Self> {
        let schema: Value = serde_json::from_str(REPORT_SCHEMA)?;
        Self::from_value(&schema)
    }

    /// Compile an explicit schema document. Used by tests and by callers
    /// that need a stricter gate than the shipped artifact.
    pub fn from_value(schema: &Value) -> Result<Self> {
        let compiled =
            JSONSchema::compile(schema).map_err(|e| ReportError::Schema(e.to_string()))?;
        Ok(SchemaValidator { compiled })
    }

    /// Whether `doc` conforms to the schema. No diagnostics are surfaced.
    pub fn is_valid(&self, doc: &Value) -> bool {
        self.compiled.is_valid(doc)
    }

    /// Convenience check for a typed report document.
    pub fn is_valid_report(&self, report: &ReportDocument) -> Result<bool> {
        let doc = serde_json::to_value(report)?;
        Ok(self.is_valid(&doc))
    }
}
