//! JSON import payload handling and reporting.
//!
//! Imports are best-effort: every element is decoded and validated on its
//! own, valid books are persisted, and rejected elements are reported with
//! their zero-based index and the reason.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::shared::error::FieldError;

/// Outcome of a single import element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportStatus {
    Imported,
    Failed,
}

/// Per-element import result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportItemOutcome {
    pub index: usize,
    pub status: ImportStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ImportItemOutcome {
    pub fn imported(index: usize, id: i64) -> Self {
        Self {
            index,
            status: ImportStatus::Imported,
            id: Some(id),
            error: None,
        }
    }

    pub fn failed(index: usize, error: impl Into<String>) -> Self {
        Self {
            index,
            status: ImportStatus::Failed,
            id: None,
            error: Some(error.into()),
        }
    }
}

/// Summary of a whole import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    pub total: usize,
    pub imported: usize,
    pub failed: usize,
    pub items: Vec<ImportItemOutcome>,
}

impl ImportReport {
    pub fn record(&mut self, outcome: ImportItemOutcome) {
        match outcome.status {
            ImportStatus::Imported => self.imported += 1,
            ImportStatus::Failed => self.failed += 1,
        }
        self.items.push(outcome);
    }
}

/// Why an import payload as a whole cannot be processed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("import payload must be a JSON array of books or a single book object, got {0}")]
pub struct PayloadShapeError(pub &'static str);

/// Split a payload into its elements. A single object counts as a one-element batch.
pub fn payload_items(payload: Value) -> Result<Vec<Value>, PayloadShapeError> {
    match payload {
        Value::Array(items) => Ok(items),
        object @ Value::Object(_) => Ok(vec![object]),
        Value::Null => Err(PayloadShapeError("null")),
        Value::Bool(_) => Err(PayloadShapeError("a boolean")),
        Value::Number(_) => Err(PayloadShapeError("a number")),
        Value::String(_) => Err(PayloadShapeError("a string")),
    }
}

/// Render field errors as one line for the per-item report.
pub fn describe_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}
