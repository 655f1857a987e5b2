//! Shared timestamp/event-id helpers and the tool result envelope.

use serde_json::Value as JsonValue;
use ulid::Ulid;

/// Returns unix-epoch seconds with `Z` suffix (e.g. `1771220592Z`).
pub fn now_epoch_z() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!("{}Z", secs)
}

pub fn new_event_id() -> String {
    Ulid::new().to_string()
}

/// Build a tool result mapping: `{"status": status}` merged with the fields of `extra`.
///
/// Field order is not significant to callers; only names and the status vocabulary are.
pub fn tool_envelope(status: &str, extra: JsonValue) -> JsonValue {
    let mut base = serde_json::json!({ "status": status });
    if let (Some(base_obj), Some(extra_obj)) = (base.as_object_mut(), extra.as_object()) {
        for (k, v) in extra_obj {
            if k != "status" {
                base_obj.insert(k.clone(), v.clone());
            }
        }
    }
    base
}
