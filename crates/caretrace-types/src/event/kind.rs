use serde::{Deserialize, Serialize};
use std::fmt;

/// Where an event tag was found on the wire record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagSource {
    /// Bare top-level `event` field
    Event,
    /// `input_data.event`
    InputData,
    /// `output_data.event`
    OutputData,
}

/// Normalized event kind.
///
/// Resolved once at ingestion from whichever tag field carries a known value,
/// so projection code never re-inspects raw strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "tag", rename_all = "snake_case")]
pub enum EventKind {
    SessionStarted,
    SessionEnded,
    FollowUp,
    DepressionDetection,
    TherapySuggested,
    TherapyStarted,
    TherapyInProgress,
    TherapyEnded,
    /// PHQ-9 questionnaire activity without an explicit tag
    Phq9,
    /// Tag present but not recognized
    Other(String),
    Untagged,
}

impl EventKind {
    /// Resolve a single tag string.
    ///
    /// Matching is case-insensitive after trimming. Follow-up tags are matched
    /// loosely (`followup`, `follow_up`, `FOLLOW-UP_SENT`, ...).
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim().to_ascii_lowercase();
        let kind = match tag.as_str() {
            "session_start" | "session_started" => Self::SessionStarted,
            "session_end" | "session_ended" => Self::SessionEnded,
            "depression_detection" => Self::DepressionDetection,
            "therapy_suggested" => Self::TherapySuggested,
            "therapy_started" => Self::TherapyStarted,
            "therapy_in_progress" => Self::TherapyInProgress,
            "therapy_ended" => Self::TherapyEnded,
            other => {
                let squashed: String = other.chars().filter(|c| !matches!(c, '-' | '_')).collect();
                if squashed.contains("followup") {
                    Self::FollowUp
                } else {
                    return None;
                }
            }
        };
        Some(kind)
    }

    /// Resolve the kind of a record from its tag candidates, in priority order.
    ///
    /// Therapy milestones are only honored from the bare `event` field or
    /// `input_data.event`; the therapy agent never reports them in its output.
    pub fn resolve<'a, I>(candidates: I, has_phq9_marker: bool) -> (Self, Option<TagSource>)
    where
        I: IntoIterator<Item = (TagSource, &'a str)>,
    {
        let mut first_unknown: Option<(String, TagSource)> = None;

        for (source, tag) in candidates {
            if tag.trim().is_empty() {
                continue;
            }
            match Self::from_tag(tag) {
                Some(kind) if !(kind.is_therapy() && source == TagSource::OutputData) => {
                    return (kind, Some(source));
                }
                _ => {
                    if first_unknown.is_none() {
                        first_unknown = Some((tag.trim().to_string(), source));
                    }
                }
            }
        }

        if has_phq9_marker {
            return (Self::Phq9, None);
        }

        match first_unknown {
            Some((tag, source)) => (Self::Other(tag), Some(source)),
            None => (Self::Untagged, None),
        }
    }

    /// Every known kind among the tag candidates, in priority order.
    ///
    /// A record may carry different tags in different places (a detection
    /// event that also reports `output_data.event = session_end`); each one
    /// counts. The therapy-in-output rule of [`EventKind::resolve`] applies.
    pub fn recognize_all<'a, I>(candidates: I) -> Vec<Self>
    where
        I: IntoIterator<Item = (TagSource, &'a str)>,
    {
        let mut kinds: Vec<Self> = Vec::new();
        for (source, tag) in candidates {
            if let Some(kind) = Self::from_tag(tag)
                && !(kind.is_therapy() && source == TagSource::OutputData)
                && !kinds.contains(&kind)
            {
                kinds.push(kind);
            }
        }
        kinds
    }

    pub fn is_therapy(&self) -> bool {
        matches!(
            self,
            Self::TherapySuggested
                | Self::TherapyStarted
                | Self::TherapyInProgress
                | Self::TherapyEnded
        )
    }

    pub fn label(&self) -> &str {
        match self {
            Self::SessionStarted => "session_started",
            Self::SessionEnded => "session_ended",
            Self::FollowUp => "follow_up",
            Self::DepressionDetection => "depression_detection",
            Self::TherapySuggested => "therapy_suggested",
            Self::TherapyStarted => "therapy_started",
            Self::TherapyInProgress => "therapy_in_progress",
            Self::TherapyEnded => "therapy_ended",
            Self::Phq9 => "phq9",
            Self::Other(tag) => tag,
            Self::Untagged => "-",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
