// src/api/mod.rs
//! Response glue for the Feishu tools around the document renderer.
//!
//! None of this performs I/O. Each module reads one tool's saved response
//! (document info, creation, search, table data) or checks any response
//! for the error-or-value shape the tools share. Missing keys read as empty
//! values; nothing here fails on malformed input.

mod creation;
mod document_info;
mod search;
mod table_data;
mod validation;

pub use creation::{CreatedItem, CreationOutcome, CreationResult};
pub use document_info::{document_id_for_blocks, DocumentInfo, DocumentOrigin};
pub use search::{HitKind, SearchHit, SearchResults};
pub use table_data::{TableData, TableDataCell};
pub use validation::{check_response, expected_keys, extract_error, ResponseCheck};

use serde_json::Value;

/// The string at `key`, or empty when absent or not a string.
fn string_field(value: &Value, key: &str) -> String {
    optional_string(value, key).unwrap_or_default()
}

/// The string at `key` when present and a string.
fn optional_string(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Error payloads are usually strings; anything else is shown as JSON.
/// `null`, `false` and `""` carry no error.
fn error_message(error: &Value) -> Option<String> {
    match error {
        Value::Null | Value::Bool(false) => None,
        Value::String(message) if message.is_empty() => None,
        Value::String(message) => Some(message.clone()),
        other => Some(other.to_string()),
    }
}
