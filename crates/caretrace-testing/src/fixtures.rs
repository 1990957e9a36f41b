//! Fixtures for session event generation.
//!
//! Provides:
//! - `EventBuilder`: fluent construction of wire-shaped `SessionEvent`s
//! - Canned sessions covering each agent's pipeline
//! - Helpers to serialize events the way the events API returns them

use anyhow::Result;
use caretrace_types::SessionEvent;
use serde_json::{json, Map, Value};
use std::fs;
use std::path::Path;

pub const USER_ID: i64 = 7;
pub const SESSION_ID: i64 = 42;

/// Fluent builder for a single `SessionEvent`.
///
/// # Example
/// ```
/// use caretrace_testing::EventBuilder;
///
/// let event = EventBuilder::chat("2025-03-01T10:00:00")
///     .phq9_question(1)
///     .build();
/// assert_eq!(event.phq9_question_id, Some(1));
/// ```
#[derive(Debug, Clone)]
pub struct EventBuilder {
    event: SessionEvent,
}

impl EventBuilder {
    pub fn new(agent_name: &str, timestamp: &str) -> Self {
        Self {
            event: SessionEvent {
                agent_name: Some(agent_name.to_string()),
                timestamp: timestamp.to_string(),
                user_id: USER_ID,
                session_id: SESSION_ID,
                ..SessionEvent::default()
            },
        }
    }

    pub fn chat(timestamp: &str) -> Self {
        Self::new("chat", timestamp)
    }

    pub fn classifier(timestamp: &str) -> Self {
        Self::new("classifier", timestamp)
    }

    pub fn therapy(timestamp: &str) -> Self {
        Self::new("therapy", timestamp)
    }

    pub fn ids(mut self, user_id: i64, session_id: i64) -> Self {
        self.event.user_id = user_id;
        self.event.session_id = session_id;
        self
    }

    /// Set the bare `event` tag.
    pub fn tag(mut self, tag: &str) -> Self {
        self.event.event = Some(tag.to_string());
        self
    }

    /// Set `input_data.event`.
    pub fn input_tag(self, tag: &str) -> Self {
        self.input_field("event", json!(tag))
    }

    /// Set `output_data.event`.
    pub fn output_tag(self, tag: &str) -> Self {
        self.output_field("event", json!(tag))
    }

    pub fn input_field(mut self, key: &str, value: Value) -> Self {
        insert_field(&mut self.event.input_data, key, value);
        self
    }

    pub fn output_field(mut self, key: &str, value: Value) -> Self {
        insert_field(&mut self.event.output_data, key, value);
        self
    }

    pub fn phq9_question(mut self, question_id: u32) -> Self {
        self.event.phq9_question_id = Some(question_id);
        self
    }

    pub fn phq9_started(mut self) -> Self {
        self.event.phq9_started = Some(true);
        self
    }

    pub fn phq9_completed(mut self) -> Self {
        self.event.phq9_completed = Some(true);
        self
    }

    /// Tag the therapy name the way the therapy agent does (`output_data.therapy_name`).
    pub fn therapy_name(self, name: &str) -> Self {
        self.output_field("therapy_name", json!(name))
    }

    pub fn risk(mut self, level: &str) -> Self {
        self.event.risk_level = Some(level.to_string());
        self
    }

    pub fn anomaly(mut self) -> Self {
        self.event.anomaly = Some(true);
        self
    }

    pub fn summary(mut self, summary: &str) -> Self {
        self.event.summary = Some(json!(summary));
        self
    }

    pub fn build(self) -> SessionEvent {
        self.event
    }
}

fn insert_field(slot: &mut Option<Value>, key: &str, value: Value) {
    if !matches!(slot, Some(Value::Object(_))) {
        *slot = Some(Value::Object(Map::new()));
    }
    if let Some(Value::Object(map)) = slot {
        map.insert(key.to_string(), value);
    }
}

/// Assessment midway through the PHQ-9: questions 1..=3 answered, not completed.
pub fn assessment_in_progress() -> Vec<SessionEvent> {
    vec![
        EventBuilder::chat("2025-03-01T10:00:00")
            .tag("session_start")
            .build(),
        EventBuilder::chat("2025-03-01T10:01:00")
            .input_field("message", json!("I have been feeling low"))
            .build(),
        EventBuilder::chat("2025-03-01T10:02:00")
            .phq9_started()
            .phq9_question(1)
            .output_field("answer", json!(2))
            .build(),
        EventBuilder::chat("2025-03-01T10:03:00")
            .phq9_question(2)
            .output_field("answer", json!(1))
            .build(),
        EventBuilder::chat("2025-03-01T10:04:00")
            .phq9_question(3)
            .output_field("answer", json!(3))
            .build(),
    ]
}

/// Full session: completed assessment, classifier output and two therapies.
pub fn complete_session() -> Vec<SessionEvent> {
    let mut events = assessment_in_progress();
    events.extend([
        EventBuilder::chat("2025-03-01T10:05:00")
            .phq9_question(9)
            .phq9_completed()
            .build(),
        EventBuilder::chat("2025-03-01T10:06:00")
            .tag("follow_up")
            .build(),
        EventBuilder::classifier("2025-03-01T10:07:00")
            .output_tag("session_end")
            .build(),
        EventBuilder::classifier("2025-03-01T10:08:00")
            .tag("depression_detection")
            .output_field("level", json!("Moderate"))
            .risk("medium")
            .build(),
        EventBuilder::therapy("2025-03-01T10:09:00")
            .input_tag("THERAPY_SUGGESTED")
            .therapy_name("Breathing")
            .build(),
        EventBuilder::therapy("2025-03-01T10:10:00")
            .input_tag("THERAPY_STARTED")
            .therapy_name("Breathing")
            .build(),
        EventBuilder::therapy("2025-03-01T10:11:00")
            .input_tag("THERAPY_IN_PROGRESS")
            .therapy_name("Breathing")
            .build(),
        EventBuilder::therapy("2025-03-01T10:12:00")
            .input_tag("THERAPY_ENDED")
            .therapy_name("Breathing")
            .build(),
        EventBuilder::therapy("2025-03-01T10:13:00")
            .input_tag("THERAPY_SUGGESTED")
            .therapy_name("Journaling")
            .build(),
    ]);
    events
}

/// Serialize events inside the `{ "events": [...] }` envelope of the events API.
pub fn events_document(events: &[SessionEvent]) -> Value {
    json!({ "events": events })
}

/// Write an events envelope to `path`.
pub fn write_events_file(path: &Path, events: &[SessionEvent]) -> Result<()> {
    let body = serde_json::to_string_pretty(&events_document(events))?;
    fs::write(path, body)?;
    Ok(())
}
