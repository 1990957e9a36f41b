use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct PatientListViewModel {
    pub counts: LevelCountsViewModel,
    pub patients: Vec<PatientEntry>,
    /// Sources that failed to load; the roster is partial when non-empty
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LevelCountsViewModel {
    pub total: usize,
    pub severe: usize,
    pub moderate: usize,
    pub minimal: usize,
    pub pending: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PatientEntry {
    pub user_id: i64,
    pub nickname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub virtual_character: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_mode: Option<String>,
    pub level: Option<String>,
    /// R value as a whole percentage
    pub r_percent: Option<i64>,
    pub emotion: Option<String>,
    pub assessed_at: Option<String>,
    pub last_session_id: Option<String>,
    pub doctor_level: Option<String>,
    pub doctor_comment: Option<String>,
    pub can_annotate: bool,
}
