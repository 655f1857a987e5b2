//! Lenient numeric input handling.
//!
//! Tool arguments arrive from a model and are often out of range or the wrong
//! JSON type. They are clamped or defaulted, never rejected.

use serde_json::Value;

pub const MEMORY_LIMIT_MIN: i64 = 1;
pub const MEMORY_LIMIT_MAX: i64 = 10;

pub fn clamp_limit(raw: i64, min: i64, max: i64) -> i64 {
    raw.clamp(min, max)
}

pub fn clamp_memory_limit(raw: i64) -> i64 {
    clamp_limit(raw, MEMORY_LIMIT_MIN, MEMORY_LIMIT_MAX)
}

/// Clamp into `[min, max]` and convert for use as a row limit.
pub fn clamp_to_usize(raw: i64, min: i64, max: i64) -> usize {
    usize::try_from(clamp_limit(raw, min.max(0), max)).unwrap_or(0)
}

/// Read an integer from a JSON value: numbers (truncated toward zero) and numeric
/// strings are accepted; anything else, including absence, yields `default`.
pub fn lenient_int(value: Option<&Value>, default: i64) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(default),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f.trunc() as i64))
                .unwrap_or(default)
        }
        _ => default,
    }
}
