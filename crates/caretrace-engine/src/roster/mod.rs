//! Patient roster: merges preferences, latest level index, PHQ-9 completion
//! and doctor comments into one row per patient.

mod annotate;

pub use annotate::{prepare_annotation, AnnotationRejection};

use serde::Serialize;
use std::collections::HashMap;

use caretrace_types::{
    DepressionLevel, DoctorComment, LevelIndexEntry, PatientPreference, Phq9LastSession,
};

/// Outcome of the per-user `GET /phq9/last-session/{userID}` lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Phq9Lookup {
    Found(Phq9LastSession),
    /// Request failed; the user is treated as not having completed the PHQ-9
    Failed,
}

/// Everything fetched from the API for one roster build.
#[derive(Debug, Clone, Default)]
pub struct RosterSources {
    pub preferences: Vec<PatientPreference>,
    pub levels: Vec<LevelIndexEntry>,
    pub phq9: HashMap<i64, Phq9Lookup>,
    pub comments: Vec<DoctorComment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientRow {
    pub user_id: i64,
    pub nickname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub virtual_character: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_mode: Option<String>,
    /// Detected level, or `Pending` while the PHQ-9 is incomplete; `None` when never assessed
    pub level: Option<DepressionLevel>,
    pub r_value: Option<f64>,
    pub emotion: Option<String>,
    pub assessed_at: Option<String>,
    pub last_session_id: Option<String>,
    pub doctor_level: Option<DepressionLevel>,
    pub doctor_comment: Option<String>,
}

impl PatientRow {
    /// R value as a whole percentage.
    pub fn r_percent(&self) -> Option<i64> {
        self.r_value.map(|r| (r * 100.0).round() as i64)
    }

    pub fn has_comment(&self) -> bool {
        self.doctor_comment
            .as_deref()
            .is_some_and(|comment| !comment.trim().is_empty())
    }

    /// A doctor may annotate once, and only after the PHQ-9 is complete.
    pub fn can_annotate(&self) -> bool {
        !self.has_comment() && !self.level.as_ref().is_some_and(DepressionLevel::is_pending)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LevelCounts {
    pub total: usize,
    pub severe: usize,
    pub moderate: usize,
    pub minimal: usize,
    pub pending: usize,
}

impl LevelCounts {
    fn from_rows(rows: &[PatientRow]) -> Self {
        let mut counts = LevelCounts {
            total: rows.len(),
            ..LevelCounts::default()
        };
        for level in rows.iter().filter_map(|row| row.level.as_ref()) {
            match level {
                DepressionLevel::Severe => counts.severe += 1,
                DepressionLevel::Moderate => counts.moderate += 1,
                DepressionLevel::Minimal => counts.minimal += 1,
                DepressionLevel::Pending => counts.pending += 1,
                DepressionLevel::Other(_) => {}
            }
        }
        counts
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Roster {
    pub patients: Vec<PatientRow>,
    pub counts: LevelCounts,
}

impl Roster {
    pub fn patient(&self, user_id: i64) -> Option<&PatientRow> {
        self.patients.iter().find(|row| row.user_id == user_id)
    }
}

/// Merge the fetched payloads; every preference user becomes one row, in
/// preference order.
pub fn build(sources: RosterSources) -> Roster {
    let RosterSources {
        preferences,
        levels,
        phq9,
        comments,
    } = sources;

    let patients: Vec<PatientRow> = preferences
        .into_iter()
        .map(|preference| {
            let entry = levels.iter().find(|entry| entry.user_id == preference.user_id);
            let comment = comments
                .iter()
                .find(|comment| comment.user_id == preference.user_id);

            let (level, last_session_id) = match entry {
                Some(entry) => merge_level(entry, phq9.get(&preference.user_id)),
                None => (None, None),
            };

            PatientRow {
                user_id: preference.user_id,
                nickname: preference.nickname,
                virtual_character: preference.virtual_character,
                input_mode: preference.input_mode,
                level,
                r_value: entry.and_then(|entry| entry.r_value),
                emotion: entry.and_then(|entry| entry.emotion().map(str::to_string)),
                assessed_at: entry.and_then(|entry| entry.created_at.clone()),
                last_session_id,
                doctor_level: comment
                    .and_then(|comment| comment.level.as_deref())
                    .map(DepressionLevel::from_label),
                doctor_comment: comment.and_then(|comment| comment.comment.clone()),
            }
        })
        .collect();

    Roster {
        counts: LevelCounts::from_rows(&patients),
        patients,
    }
}

/// The detected level only counts once all nine PHQ-9 questions are answered.
fn merge_level(
    entry: &LevelIndexEntry,
    lookup: Option<&Phq9Lookup>,
) -> (Option<DepressionLevel>, Option<String>) {
    match lookup {
        Some(Phq9Lookup::Found(last)) if last.is_complete() => (
            entry.level.as_deref().map(DepressionLevel::from_label),
            last.session_id.clone(),
        ),
        Some(Phq9Lookup::Found(last)) => (Some(DepressionLevel::Pending), last.session_id.clone()),
        Some(Phq9Lookup::Failed) | None => (Some(DepressionLevel::Pending), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(super) fn preference(user_id: i64, nickname: &str) -> PatientPreference {
        PatientPreference {
            user_id,
            nickname: nickname.to_string(),
            virtual_character: None,
            input_mode: Some("voice".to_string()),
        }
    }

    pub(super) fn level(user_id: i64, label: &str, r_value: f64) -> LevelIndexEntry {
        LevelIndexEntry {
            user_id,
            r_value: Some(r_value),
            level: Some(label.to_string()),
            created_at: Some("2025-03-01T10:00:00".to_string()),
            components: None,
        }
    }

    pub(super) fn answered(count: u32) -> Phq9Lookup {
        Phq9Lookup::Found(Phq9LastSession {
            success: true,
            session_id: Some("s-1".to_string()),
            answered_count: count,
        })
    }

    pub(super) fn sources() -> RosterSources {
        RosterSources {
            preferences: vec![
                preference(1, "amal"),
                preference(2, "binu"),
                preference(3, "chathu"),
                preference(4, "dilan"),
            ],
            levels: vec![
                level(1, "severe", 0.876),
                level(2, "Moderate", 0.5),
                level(3, "Minimal", 0.1),
            ],
            phq9: HashMap::from([(1, answered(9)), (2, answered(5)), (3, Phq9Lookup::Failed)]),
            comments: vec![DoctorComment {
                user_id: 1,
                level: Some("Severe".to_string()),
                comment: Some("Refer to psychiatrist".to_string()),
            }],
        }
    }

    #[test]
    fn test_incomplete_phq9_is_pending() {
        let roster = build(sources());

        assert_eq!(roster.patient(1).unwrap().level, Some(DepressionLevel::Severe));
        assert_eq!(roster.patient(2).unwrap().level, Some(DepressionLevel::Pending));
        assert_eq!(roster.patient(2).unwrap().last_session_id.as_deref(), Some("s-1"));
        assert_eq!(roster.patient(3).unwrap().level, Some(DepressionLevel::Pending));
        assert_eq!(roster.patient(3).unwrap().last_session_id, None);
        assert_eq!(roster.patient(4).unwrap().level, None);
    }

    #[test]
    fn test_counts() {
        let roster = build(sources());
        assert_eq!(
            roster.counts,
            LevelCounts {
                total: 4,
                severe: 1,
                moderate: 0,
                minimal: 0,
                pending: 2,
            }
        );
    }

    #[test]
    fn test_annotation_eligibility() {
        let roster = build(sources());

        assert!(!roster.patient(1).unwrap().can_annotate());
        assert!(!roster.patient(2).unwrap().can_annotate());
        assert!(roster.patient(4).unwrap().can_annotate());
    }

    #[test]
    fn test_r_value_as_percentage() {
        let roster = build(sources());
        assert_eq!(roster.patient(1).unwrap().r_percent(), Some(88));
        assert_eq!(roster.patient(4).unwrap().r_percent(), None);
        assert_eq!(
            roster.patient(1).unwrap().doctor_level,
            Some(DepressionLevel::Severe)
        );
    }
}
