use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

/// Naive layouts emitted by the agent pipeline (implicitly UTC).
const NAIVE_TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Parse an event timestamp.
///
/// Accepts RFC 3339 strings and the naive ISO-8601 strings the pipeline writes
/// without an offset (`2025-03-02T10:15:00.123456`), which are read as UTC.
/// Returns `None` for empty or unrecognized input; callers display the raw
/// string instead.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Read a string field from an optional JSON object.
pub fn json_str<'a>(value: Option<&'a Value>, key: &str) -> Option<&'a str> {
    value?.get(key)?.as_str()
}

/// Read an unsigned integer field, tolerating numeric strings (`"3"`).
pub fn json_u32(value: Option<&Value>, key: &str) -> Option<u32> {
    match value?.get(key)? {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Read a boolean field, tolerating `"true"`/`"false"` strings.
pub fn json_bool(value: Option<&Value>, key: &str) -> Option<bool> {
    match value?.get(key)? {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}
