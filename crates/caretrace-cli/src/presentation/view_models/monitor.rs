use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct MonitorViewModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub filters: MonitorFilterSummary,
    pub summary: MonitorSummaryViewModel,
    /// Filtered rows, newest first
    pub events: Vec<MonitorRow>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MonitorFilterSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub until: Option<String>,
}

impl MonitorFilterSummary {
    pub fn is_empty(&self) -> bool {
        self.agent.is_none()
            && self.risk.is_none()
            && self.search.is_none()
            && self.since.is_none()
            && self.until.is_none()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MonitorSummaryViewModel {
    pub total: usize,
    pub anomalies: usize,
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub by_agent: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonitorRow {
    pub timestamp: String,
    pub user_id: i64,
    pub session_id: i64,
    /// Producer agent name as sent (`chat`), `-` when missing
    pub agent_name: String,
    /// Mapped agent key, `unknown` for unmapped names
    pub agent: String,
    pub event: String,
    pub risk: String,
    pub anomaly: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Value>,
}
