use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ConfigViewModel {
    pub path: String,
    pub exists: bool,
    pub api_base: String,
    /// Effective events base (falls back to `api_base`)
    pub events_base: String,
    /// Masked; only the last four characters are shown
    pub token: Option<String>,
    pub timeout_secs: u64,
    pub timezone: String,
    /// Environment variables overriding the file
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub env_overrides: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigWriteViewModel {
    pub config: ConfigViewModel,
    /// Keys written by this call
    pub updated: Vec<String>,
}
