//! Agent tool modules.
//!
//! Each agent owns a handful of deterministic tool functions. Tools take
//! primitive arguments and always return a JSON mapping with a `status` field;
//! storage failures become `{"status": "error", "error_message": ...}` rather
//! than propagating to the agent framework.

pub mod coding;
pub mod content_creator;
pub mod learning_coach;
pub mod memory;
pub mod project_manager;

use crate::core::error::LedgerError;
use crate::core::time::tool_envelope;
use serde_json::Value;

pub fn tool_error(message: impl Into<String>) -> Value {
    tool_envelope(
        "error",
        serde_json::json!({ "error_message": message.into() }),
    )
}

/// Collapse a fallible tool body into the tool result mapping.
pub fn settle(result: Result<Value, LedgerError>) -> Value {
    result.unwrap_or_else(|e| tool_error(e.to_string()))
}

/// Comma-split tag argument as the agents receive it: empty input means no tags,
/// otherwise pieces are kept verbatim (including surrounding whitespace).
pub fn split_tags(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        Vec::new()
    } else {
        raw.split(',').map(str::to_string).collect()
    }
}
