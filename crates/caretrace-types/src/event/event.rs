use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::de;
use crate::{Error, Result};

// NOTE: Wire Format
//
// Events are produced by an external agent pipeline and arrive loosely typed:
// - Tags may sit in `event`, `input_data.event` or `output_data.event`
// - PHQ-9 markers may sit at the top level or inside `output_data`
// - Timestamps are naive ISO-8601 strings, sometimes missing
//
// This struct mirrors the wire shape and never rejects a record for a missing
// field. Interpretation happens once, in `NormalizedEvent`.

/// Raw session event as returned by the events API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionEvent {
    /// Free-form event tag (e.g. `THERAPY_STARTED`)
    #[serde(
        default,
        deserialize_with = "de::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub event: Option<String>,

    /// Naive ISO-8601 timestamp (UTC); empty when the producer omitted it
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub timestamp: String,

    /// Producer agent name (`chat`, `classifier`, `therapy`)
    #[serde(
        default,
        deserialize_with = "de::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub agent_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_data: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_data: Option<Value>,

    #[serde(default, deserialize_with = "de::id_or_zero")]
    pub user_id: i64,

    #[serde(default, deserialize_with = "de::id_or_zero")]
    pub session_id: i64,

    #[serde(
        rename = "phq9_questionID",
        default,
        deserialize_with = "de::optional_u32",
        skip_serializing_if = "Option::is_none"
    )]
    pub phq9_question_id: Option<u32>,

    #[serde(
        default,
        deserialize_with = "de::optional_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub phq9_completed: Option<bool>,

    #[serde(
        default,
        deserialize_with = "de::optional_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub phq9_started: Option<bool>,

    /// Free-text or structured summary attached by the monitor agent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<Value>,

    #[serde(
        default,
        deserialize_with = "de::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub risk_level: Option<String>,

    #[serde(
        default,
        deserialize_with = "de::optional_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub anomaly: Option<bool>,

    /// Any other top-level field, kept for display and search
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Parse an events document.
///
/// Accepts both the API envelope (`{"events": [...]}`) and a bare array. A
/// record that is not an object fails with its position in the feed.
pub fn parse_events_document(content: &str) -> Result<Vec<SessionEvent>> {
    let records = match serde_json::from_str::<Value>(content)? {
        Value::Array(records) => records,
        Value::Object(mut envelope) => match envelope.remove("events") {
            Some(Value::Array(records)) => records,
            Some(Value::Null) | None => Vec::new(),
            Some(_) => return Err(malformed("`events` is not an array".to_string())),
        },
        _ => {
            return Err(malformed(
                "expected an array of events or an object with an `events` array".to_string(),
            ));
        }
    };

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            serde_json::from_value(record)
                .map_err(|err| malformed(format!("event {}: {}", index, err)))
        })
        .collect()
}

fn malformed(message: String) -> Error {
    Error::Json(serde::de::Error::custom(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_event() {
        let event: SessionEvent = serde_json::from_str(r#"{"user_id": 4}"#).unwrap();
        assert_eq!(event.user_id, 4);
        assert_eq!(event.timestamp, "");
        assert!(event.agent_name.is_none());
    }

    #[test]
    fn test_deserialize_tolerates_null_and_string_ids() {
        let event: SessionEvent = serde_json::from_str(
            r#"{"timestamp": null, "user_id": "12", "session_id": 3, "phq9_questionID": "5"}"#,
        )
        .unwrap();
        assert_eq!(event.timestamp, "");
        assert_eq!(event.user_id, 12);
        assert_eq!(event.session_id, 3);
        assert_eq!(event.phq9_question_id, Some(5));
    }

    #[test]
    fn test_unknown_fields_are_kept() {
        let event: SessionEvent =
            serde_json::from_str(r#"{"timestamp": "2025-01-01T00:00:00", "is_anomaly": true}"#)
                .unwrap();
        assert_eq!(event.extra.get("is_anomaly"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_parse_events_document_shapes() {
        let wrapped = parse_events_document(r#"{"events": [{"user_id": 1}]}"#).unwrap();
        assert_eq!(wrapped.len(), 1);

        let bare = parse_events_document(r#"[{"user_id": 1}, {"user_id": 2}]"#).unwrap();
        assert_eq!(bare.len(), 2);

        let empty = parse_events_document(r#"{"events": null}"#).unwrap();
        assert!(empty.is_empty());

        assert!(parse_events_document("not json").is_err());
    }

    #[test]
    fn test_odd_typed_fields_do_not_drop_the_feed() {
        let events = parse_events_document(
            r#"{"events": [
                {"user_id": 1, "agent_name": "chat", "phq9_questionID": 1},
                {"user_id": 1, "agent_name": "chat", "phq9_completed": "true",
                 "phq9_started": {"at": 1}, "risk_level": 3, "anomaly": "yes", "event": 7}
            ]}"#,
        )
        .unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[1].phq9_completed, Some(true));
        assert_eq!(events[1].phq9_started, None);
        assert_eq!(events[1].risk_level.as_deref(), Some("3"));
        assert_eq!(events[1].anomaly, None);
        assert_eq!(events[1].event.as_deref(), Some("7"));
    }

    #[test]
    fn test_malformed_record_names_its_position() {
        let err = parse_events_document(r#"[{"user_id": 1}, 42]"#).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("event 1"), "{}", message);
        assert!(message.contains("invalid type"), "{}", message);

        let err = parse_events_document(r#"{"events": "none"}"#).unwrap_err();
        assert!(err.to_string().contains("`events` is not an array"));
    }
}
