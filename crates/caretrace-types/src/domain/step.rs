use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Progress status of a workflow stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    /// Stage not reached
    Wait,
    /// Stage currently running
    Process,
    /// Stage completed
    Finish,
}

impl StepStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepStatus::Wait => "wait",
            StepStatus::Process => "process",
            StepStatus::Finish => "finish",
        }
    }

    /// Combine presence flags; completion always dominates activity.
    pub fn from_flags(finished: bool, active: bool) -> Self {
        if finished {
            StepStatus::Finish
        } else if active {
            StepStatus::Process
        } else {
            StepStatus::Wait
        }
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One node of an agent's progress tree.
///
/// Derived fresh from the event list on every projection and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepNode {
    pub title: String,

    /// Stable identifier of the stage within its agent (`phq_question_3`)
    pub event_key: String,

    pub status: StepStatus,

    /// Raw timestamp of the event that settled this stage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<StepNode>,

    /// Output payload of the matched event, for detail views
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_output: Option<Value>,
}

impl StepNode {
    pub fn new(title: impl Into<String>, event_key: impl Into<String>, status: StepStatus) -> Self {
        Self {
            title: title.into(),
            event_key: event_key.into(),
            status,
            timestamp: None,
            children: Vec::new(),
            raw_output: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: Option<String>) -> Self {
        self.timestamp = timestamp.filter(|ts| !ts.is_empty());
        self
    }

    pub fn with_children(mut self, children: Vec<StepNode>) -> Self {
        self.children = children;
        self
    }

    pub fn with_raw_output(mut self, raw_output: Option<Value>) -> Self {
        self.raw_output = raw_output;
        self
    }
}

/// Index path into a forest of `StepNode`s (`[2, 0]` = first child of the third stage).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StagePath(pub Vec<usize>);

impl StagePath {
    pub fn top(index: usize) -> Self {
        Self(vec![index])
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn resolve<'a>(&self, nodes: &'a [StepNode]) -> Option<&'a StepNode> {
        let (first, rest) = self.0.split_first()?;
        let mut node = nodes.get(*first)?;
        for index in rest {
            node = node.children.get(*index)?;
        }
        Some(node)
    }
}
