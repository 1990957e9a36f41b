use std::fmt;

use caretrace_types::{DepressionLevel, NewDoctorComment};

use super::Roster;

/// Why a doctor annotation was refused before reaching the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationRejection {
    UnknownPatient(i64),
    AlreadyAnnotated(i64),
    LevelPending(i64),
    InvalidLevel(String),
    EmptyComment,
}

impl fmt::Display for AnnotationRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotationRejection::UnknownPatient(user_id) => {
                write!(f, "No patient with user id {}", user_id)
            }
            AnnotationRejection::AlreadyAnnotated(user_id) => {
                write!(f, "Patient {} already has a doctor comment", user_id)
            }
            AnnotationRejection::LevelPending(user_id) => write!(
                f,
                "Patient {} has not completed the PHQ-9; level is still pending",
                user_id
            ),
            AnnotationRejection::InvalidLevel(level) => write!(
                f,
                "Invalid level '{}' (expected Minimal, Moderate or Severe)",
                level
            ),
            AnnotationRejection::EmptyComment => write!(f, "Comment must not be empty"),
        }
    }
}

impl std::error::Error for AnnotationRejection {}

/// Validate an annotation against the current roster and build the request body.
pub fn prepare_annotation(
    roster: &Roster,
    user_id: i64,
    level: &str,
    comment: &str,
) -> Result<NewDoctorComment, AnnotationRejection> {
    let level = DepressionLevel::assignable(level)
        .ok_or_else(|| AnnotationRejection::InvalidLevel(level.trim().to_string()))?;

    let comment = comment.trim();
    if comment.is_empty() {
        return Err(AnnotationRejection::EmptyComment);
    }

    let patient = roster
        .patient(user_id)
        .ok_or(AnnotationRejection::UnknownPatient(user_id))?;
    if patient.has_comment() {
        return Err(AnnotationRejection::AlreadyAnnotated(user_id));
    }
    if patient.level.as_ref().is_some_and(DepressionLevel::is_pending) {
        return Err(AnnotationRejection::LevelPending(user_id));
    }

    Ok(NewDoctorComment {
        user_id,
        comment: comment.to_string(),
        level: level.label().to_string(),
    })
}
