use crate::presentation::formatters::format_timestamp;
use crate::presentation::view_models::{
    CommandResultViewModel, Guidance, LevelCountsViewModel, PatientEntry, PatientListViewModel,
    StatusBadge,
};
use caretrace_engine::{LevelCounts, PatientRow};
use caretrace_runtime::RosterReport;
use chrono_tz::Tz;

pub fn present_patients(
    report: &RosterReport,
    tz: Tz,
) -> CommandResultViewModel<PatientListViewModel> {
    let roster = &report.roster;
    let content = PatientListViewModel {
        counts: present_counts(&roster.counts),
        patients: roster
            .patients
            .iter()
            .map(|row| present_patient(row, tz))
            .collect(),
        warnings: report.warnings.clone(),
    };

    let mut result = CommandResultViewModel::new(content);
    let total = roster.counts.total;

    if total == 0 {
        return result.with_badge(StatusBadge::info("No patients found"));
    }

    let label = if total == 1 {
        "1 patient".to_string()
    } else {
        format!("{} patients", total)
    };
    result = if report.warnings.is_empty() {
        result.with_badge(StatusBadge::success(label))
    } else {
        result.with_badge(StatusBadge::warning(format!(
            "{} (incomplete: {} source(s) unavailable)",
            label,
            report.warnings.len()
        )))
    };

    let annotatable = roster
        .patients
        .iter()
        .find(|row| row.can_annotate() && row.level.is_some());
    if let Some(patient) = annotatable {
        result = result.with_suggestion(
            Guidance::new(format!("Annotate {} with a doctor level", patient.nickname))
                .with_command(format!(
                    "caretrace comment add --user {} --level <Minimal|Moderate|Severe> --comment \"...\"",
                    patient.user_id
                )),
        );
    }
    if roster.counts.pending > 0 {
        result = result.with_suggestion(Guidance::new(format!(
            "{} patient(s) have not finished the PHQ-9; their level stays Pending",
            roster.counts.pending
        )));
    }

    result
}

/// Preferences API failed: empty roster with the reason.
pub fn present_patients_unavailable(error: &str) -> CommandResultViewModel<PatientListViewModel> {
    let content = PatientListViewModel {
        counts: LevelCountsViewModel::default(),
        patients: Vec::new(),
        warnings: vec![error.to_string()],
    };

    CommandResultViewModel::new(content)
        .with_badge(StatusBadge::warning(format!("Patients unavailable: {}", error)))
        .with_suggestion(
            Guidance::new("Check the API address and token").with_command("caretrace config show"),
        )
}

fn present_counts(counts: &LevelCounts) -> LevelCountsViewModel {
    LevelCountsViewModel {
        total: counts.total,
        severe: counts.severe,
        moderate: counts.moderate,
        minimal: counts.minimal,
        pending: counts.pending,
    }
}

fn present_patient(row: &PatientRow, tz: Tz) -> PatientEntry {
    PatientEntry {
        user_id: row.user_id,
        nickname: row.nickname.clone(),
        virtual_character: row.virtual_character.clone(),
        input_mode: row.input_mode.clone(),
        level: row.level.as_ref().map(|level| level.label().to_string()),
        r_percent: row.r_percent(),
        emotion: row.emotion.clone(),
        assessed_at: row
            .assessed_at
            .as_deref()
            .map(|ts| format_timestamp(Some(ts), tz)),
        last_session_id: row.last_session_id.clone(),
        doctor_level: row.doctor_level.as_ref().map(|level| level.label().to_string()),
        doctor_comment: row.doctor_comment.clone(),
        can_annotate: row.can_annotate(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::StatusLevel;
    use caretrace_engine::{Phq9Lookup, RosterSources, build_roster};
    use caretrace_types::{LevelIndexEntry, PatientPreference, Phq9LastSession};
    use std::collections::HashMap;

    fn report(warnings: Vec<String>) -> RosterReport {
        let sources = RosterSources {
            preferences: vec![
                PatientPreference {
                    user_id: 1,
                    nickname: "amal".to_string(),
                    virtual_character: None,
                    input_mode: None,
                },
                PatientPreference {
                    user_id: 2,
                    nickname: "binu".to_string(),
                    virtual_character: None,
                    input_mode: None,
                },
            ],
            levels: vec![
                LevelIndexEntry {
                    user_id: 1,
                    r_value: Some(0.42),
                    level: Some("Moderate".to_string()),
                    created_at: Some("2025-03-01T10:00:00Z".to_string()),
                    components: None,
                },
                LevelIndexEntry {
                    user_id: 2,
                    r_value: Some(0.9),
                    level: Some("Severe".to_string()),
                    created_at: None,
                    components: None,
                },
            ],
            phq9: HashMap::from([
                (
                    1,
                    Phq9Lookup::Found(Phq9LastSession {
                        success: true,
                        session_id: Some("s-1".to_string()),
                        answered_count: 9,
                    }),
                ),
                (2, Phq9Lookup::Failed),
            ]),
            comments: Vec::new(),
        };
        RosterReport {
            roster: build_roster(sources),
            warnings,
        }
    }

    #[test]
    fn test_present_roster() {
        let result = present_patients(&report(Vec::new()), chrono_tz::Asia::Colombo);

        let badge = result.badge.as_ref().unwrap();
        assert_eq!(badge.level, StatusLevel::Success);
        assert_eq!(badge.label, "2 patients");

        let amal = &result.content.patients[0];
        assert_eq!(amal.level.as_deref(), Some("Moderate"));
        assert_eq!(amal.r_percent, Some(42));
        assert_eq!(amal.assessed_at.as_deref(), Some("2025-03-01 15:30:00"));
        assert!(amal.can_annotate);

        let binu = &result.content.patients[1];
        assert_eq!(binu.level.as_deref(), Some("Pending"));
        assert!(!binu.can_annotate);

        assert_eq!(result.content.counts.pending, 1);
        assert_eq!(result.suggestions.len(), 2);
        assert!(result.suggestions[0].command.as_deref().unwrap().contains("--user 1"));
    }

    #[test]
    fn test_partial_roster_warns() {
        let result = present_patients(
            &report(vec!["Level index unavailable: timeout".to_string()]),
            chrono_tz::UTC,
        );
        let badge = result.badge.unwrap();
        assert_eq!(badge.level, StatusLevel::Warning);
        assert_eq!(badge.label, "2 patients (incomplete: 1 source(s) unavailable)");
        assert_eq!(result.content.warnings.len(), 1);
    }
}
