use std::fmt;

use super::{heading, level_label};
use crate::presentation::formatters::truncate;
use crate::presentation::view_models::{CreateView, PatientListViewModel, ViewMode};

impl CreateView for PatientListViewModel {
    fn create_view<'a>(&'a self, mode: ViewMode) -> Box<dyn fmt::Display + 'a> {
        Box::new(PatientListView { data: self, mode })
    }
}

struct PatientListView<'a> {
    data: &'a PatientListViewModel,
    mode: ViewMode,
}

impl<'a> fmt::Display for PatientListView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mode == ViewMode::Minimal {
            for patient in &self.data.patients {
                writeln!(
                    f,
                    "{}\t{}\t{}",
                    patient.user_id,
                    patient.nickname,
                    patient.level.as_deref().unwrap_or("-")
                )?;
            }
            return Ok(());
        }

        let counts = &self.data.counts;
        writeln!(
            f,
            "{}  total {}  severe {}  moderate {}  minimal {}  pending {}",
            heading("Patients"),
            counts.total,
            counts.severe,
            counts.moderate,
            counts.minimal,
            counts.pending
        )?;
        for warning in &self.data.warnings {
            writeln!(f, "  ! {}", warning)?;
        }
        writeln!(f)?;

        if self.data.patients.is_empty() {
            return writeln!(f, "No data");
        }

        writeln!(
            f,
            "{:<6} {:<16} {:<9} {:>4}  {:<10} {:<9} COMMENT",
            "USER", "NICKNAME", "LEVEL", "R%", "EMOTION", "DOCTOR"
        )?;
        for patient in &self.data.patients {
            let r_percent = patient
                .r_percent
                .map(|r| r.to_string())
                .unwrap_or_else(|| "-".to_string());
            writeln!(
                f,
                "{:<6} {:<16} {} {:>4}  {:<10} {} {}",
                patient.user_id,
                truncate(&patient.nickname, 16),
                level_label(patient.level.as_deref()),
                r_percent,
                patient.emotion.as_deref().unwrap_or("-"),
                level_label(patient.doctor_level.as_deref()),
                patient.doctor_comment.as_deref().unwrap_or("-")
            )?;

            if self.mode == ViewMode::Verbose {
                writeln!(
                    f,
                    "       assessed {}  last PHQ-9 session {}  character {}  input {}",
                    patient.assessed_at.as_deref().unwrap_or("-"),
                    patient.last_session_id.as_deref().unwrap_or("-"),
                    patient.virtual_character.as_deref().unwrap_or("-"),
                    patient.input_mode.as_deref().unwrap_or("-")
                )?;
            }
        }
        Ok(())
    }
}
