use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
pub struct ProgressViewModel {
    /// `None` when no session was selected
    pub session: Option<SessionHeader>,
    /// `api` or the path of the events dump
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Agent key of the first agent with an active stage
    pub focus: Option<String>,
    pub agents: Vec<AgentProgressViewModel>,
    pub unknown_events: usize,
}

impl ProgressViewModel {
    pub fn total_events(&self) -> usize {
        self.agents.iter().map(|agent| agent.event_count).sum::<usize>() + self.unknown_events
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionHeader {
    pub user_id: i64,
    pub session_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentProgressViewModel {
    /// Agent key (`assessment`, `classifier`, `therapy`)
    pub agent: String,
    pub display_name: String,
    pub event_count: usize,
    pub is_active: bool,
    pub finished_stages: usize,
    pub total_stages: usize,
    /// Title of the active stage (first `process` node, else the last stage)
    pub active_stage: Option<String>,
    pub stages: Vec<StageViewModel>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StageViewModel {
    pub title: String,
    pub key: String,
    /// `wait`, `process` or `finish`
    pub status: String,
    /// Localised display time of the event that settled the stage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<StageViewModel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
}
