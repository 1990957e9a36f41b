use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use super::event::SessionEvent;
use super::kind::{EventKind, TagSource};
use crate::{AgentBucket, RiskLevel, json_bool, json_str, json_u32, parse_timestamp};

/// PHQ-9 questionnaire facts carried by an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Phq9Marker {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_id: Option<u32>,
    pub started: bool,
    pub completed: bool,
}

impl Phq9Marker {
    pub fn is_present(&self) -> bool {
        self.question_id.is_some() || self.started || self.completed
    }
}

/// Internal event representation.
///
/// Every fallback chain of the wire format (tag location, PHQ-9 field
/// location, therapy name location, risk label location) is resolved here,
/// once, so consumers only ever read typed fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedEvent {
    /// Position in the original feed, used to keep sorting stable
    pub sequence: usize,
    pub bucket: AgentBucket,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,
    /// Primary kind, used for display
    pub kind: EventKind,
    /// Every kind the record carries; always contains `kind`
    pub kinds: Vec<EventKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_source: Option<TagSource>,
    /// Parsed timestamp; `None` when missing or malformed
    pub timestamp: Option<DateTime<Utc>>,
    pub raw_timestamp: String,
    pub user_id: i64,
    pub session_id: i64,
    pub phq9: Phq9Marker,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub therapy_name: Option<String>,
    pub risk: RiskLevel,
    pub anomaly: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Value>,
}

impl NormalizedEvent {
    pub fn from_event(event: &SessionEvent, sequence: usize) -> Self {
        let input = event.input_data.as_ref();
        let output = event.output_data.as_ref();

        let phq9 = Phq9Marker {
            question_id: event
                .phq9_question_id
                .or_else(|| json_u32(output, "phq9_questionID")),
            started: event.phq9_started == Some(true)
                || json_bool(output, "phq9_started") == Some(true),
            completed: event.phq9_completed == Some(true)
                || json_bool(output, "phq9_completed") == Some(true),
        };

        let candidates: Vec<(TagSource, &str)> = [
            (TagSource::Event, event.event.as_deref()),
            (TagSource::InputData, json_str(input, "event")),
            (TagSource::OutputData, json_str(output, "event")),
        ]
        .into_iter()
        .filter_map(|(source, tag)| tag.map(|tag| (source, tag)))
        .collect();
        let (kind, tag_source) = EventKind::resolve(candidates.iter().copied(), phq9.is_present());
        let mut kinds = EventKind::recognize_all(candidates.iter().copied());
        if !kinds.contains(&kind) {
            kinds.insert(0, kind.clone());
        }

        let therapy_name = json_str(output, "therapy_name")
            .or_else(|| json_str(input, "therapy_name"))
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        let risk_label = event
            .risk_level
            .as_deref()
            .or_else(|| json_str(output, "risk_level"))
            .or_else(|| json_str(output, "risk"));

        let anomaly = event.anomaly == Some(true)
            || event.extra.get("is_anomaly").and_then(Value::as_bool) == Some(true)
            || json_bool(output, "anomaly") == Some(true)
            || json_bool(output, "is_anomaly") == Some(true);

        Self {
            sequence,
            bucket: AgentBucket::from_agent_name(event.agent_name.as_deref()),
            agent_name: event.agent_name.clone(),
            kind,
            kinds,
            tag_source,
            timestamp: parse_timestamp(&event.timestamp),
            raw_timestamp: event.timestamp.clone(),
            user_id: event.user_id,
            session_id: event.session_id,
            phq9,
            therapy_name,
            risk: RiskLevel::normalize(risk_label),
            anomaly,
            input_data: event.input_data.clone(),
            output_data: event.output_data.clone(),
            summary: event.summary.clone(),
        }
    }

    pub fn has_kind(&self, kind: &EventKind) -> bool {
        self.kinds.contains(kind)
    }

    /// Raw timestamp for display, `None` when the producer sent nothing.
    pub fn display_timestamp(&self) -> Option<String> {
        let raw = self.raw_timestamp.trim();
        (!raw.is_empty()).then(|| raw.to_string())
    }
}
