//! Payloads of the patient, level-detection and doctor-annotation endpoints.
//!
//! Field names follow the backend's camelCase/`ID` conventions on the wire.

use serde::{Deserialize, Serialize};

use crate::de;

/// `GET /api/blissme/all-preferences`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreferencesResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub preferences: PreferencesBody,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreferencesBody {
    #[serde(default)]
    pub users: Vec<PatientPreference>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientPreference {
    #[serde(rename = "userID", default, deserialize_with = "de::id_or_zero")]
    pub user_id: i64,
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub nickname: String,
    #[serde(rename = "virtualCharacter", default)]
    pub virtual_character: Option<String>,
    #[serde(rename = "inputMode", default)]
    pub input_mode: Option<String>,
}

/// `GET /levelDetection/all-users-latest-index`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LevelIndexResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Vec<LevelIndexEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelIndexEntry {
    #[serde(rename = "userID", default, deserialize_with = "de::id_or_zero")]
    pub user_id: i64,
    /// Composite depression index in [0, 1]
    #[serde(rename = "R_value", default)]
    pub r_value: Option<f64>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub components: Option<LevelComponents>,
}

impl LevelIndexEntry {
    pub fn emotion(&self) -> Option<&str> {
        self.components
            .as_ref()?
            .classifier
            .as_ref()?
            .emotion
            .as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelComponents {
    #[serde(default)]
    pub classifier: Option<ClassifierComponent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassifierComponent {
    #[serde(default)]
    pub emotion: Option<String>,
}

/// `GET /phq9/last-session/{userID}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Phq9LastSession {
    #[serde(default)]
    pub success: bool,
    #[serde(rename = "sessionID", default, deserialize_with = "de::optional_string")]
    pub session_id: Option<String>,
    #[serde(rename = "answeredCount", default)]
    pub answered_count: u32,
}

impl Phq9LastSession {
    pub const QUESTION_COUNT: u32 = 9;

    pub fn is_complete(&self) -> bool {
        self.answered_count == Self::QUESTION_COUNT
    }
}

/// `GET /doctorlevel/comments`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DoctorCommentsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Vec<DoctorComment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorComment {
    #[serde(rename = "userID", default, deserialize_with = "de::id_or_zero")]
    pub user_id: i64,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Body of `POST /doctorlevel/comments`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDoctorComment {
    #[serde(rename = "userID")]
    pub user_id: i64,
    pub comment: String,
    pub level: String,
}
