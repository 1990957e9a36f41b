//! Event projection: flat session events to per-agent progress trees.
//!
//! Every projection is a pure function of the event list. Nothing is cached;
//! calling it twice on the same events yields identical trees.

mod active;
mod assessment;
mod classifier;
mod therapy;

use caretrace_types::{Agent, NormalizedEvent, StagePath, StepNode, StepStatus};
use serde::Serialize;

use crate::normalize::{group_by_agent, sort_chronologically};

/// Progress tree of one agent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentProgress {
    pub agent: Agent,
    pub display_name: &'static str,
    pub event_count: usize,
    pub stages: Vec<StepNode>,
    /// Path of the active stage; `None` only when there are no stages
    pub active: Option<StagePath>,
    /// Whether some top-level stage is currently in `process`
    pub is_active: bool,
}

impl AgentProgress {
    pub fn active_stage(&self) -> Option<&StepNode> {
        self.active.as_ref().and_then(|path| path.resolve(&self.stages))
    }

    /// Number of top-level stages already finished.
    pub fn finished_count(&self) -> usize {
        self.stages
            .iter()
            .filter(|stage| stage.status == StepStatus::Finish)
            .count()
    }
}

/// Projection of a whole session across the agent pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowProjection {
    /// All agents, in pipeline order
    pub agents: Vec<AgentProgress>,
    /// First agent with an active stage
    pub focus: Option<Agent>,
    /// Events whose agent name maps to no agent
    pub unknown_events: usize,
}

impl WorkflowProjection {
    pub fn agent(&self, agent: Agent) -> Option<&AgentProgress> {
        self.agents.iter().find(|progress| progress.agent == agent)
    }
}

/// Project a single agent from normalized events.
pub fn project_agent(events: &[NormalizedEvent], agent: Agent) -> AgentProgress {
    let mut sorted = events.to_vec();
    sort_chronologically(&mut sorted);
    let groups = group_by_agent(&sorted);
    build_agent(agent, groups.get(agent))
}

/// Project every agent from normalized events.
pub fn project_session(events: &[NormalizedEvent]) -> WorkflowProjection {
    let mut sorted = events.to_vec();
    sort_chronologically(&mut sorted);
    let groups = group_by_agent(&sorted);

    let agents: Vec<AgentProgress> = Agent::ALL
        .iter()
        .map(|agent| build_agent(*agent, groups.get(*agent)))
        .collect();
    let focus = agents
        .iter()
        .find(|progress| progress.is_active)
        .map(|progress| progress.agent);

    WorkflowProjection {
        agents,
        focus,
        unknown_events: groups.unknown.len(),
    }
}

fn build_agent(agent: Agent, events: &[&NormalizedEvent]) -> AgentProgress {
    let mut stages = match agent {
        Agent::Assessment => assessment::build_stages(events),
        Agent::Classifier => classifier::build_stages(events),
        Agent::Therapy => therapy::build_stages(events),
    };
    active::enforce_single_active(&mut stages);

    let is_active = stages
        .iter()
        .any(|stage| stage.status == StepStatus::Process);
    let active = active::active_path(&stages);

    AgentProgress {
        agent,
        display_name: agent.display_name(),
        event_count: events.len(),
        stages,
        active,
        is_active,
    }
}
