// Engine module - pure derivation logic (projection, monitoring, roster)
// This layer sits between wire types (types) and the runtime/CLI layers

pub mod monitor;
pub mod normalize;
pub mod projection;
pub mod roster;

pub use monitor::{
    filter_events, summarize, DateBound, EventFilter, MonitorReport, MonitorSummary, RiskCounts,
};
pub use normalize::{events_for_session, group_by_agent, normalize_events, AgentGroups};
pub use projection::{AgentProgress, WorkflowProjection};
pub use roster::{
    prepare_annotation, AnnotationRejection, LevelCounts, Phq9Lookup, PatientRow, Roster,
    RosterSources,
};

use caretrace_types::{Agent, SessionEvent};

// Façade API - Stable public interface for runtime and CLI layers

/// Project one agent's progress tree from the raw events of a session.
pub fn project_agent(events: &[SessionEvent], agent: Agent) -> AgentProgress {
    let normalized = normalize_events(events);
    projection::project_agent(&normalized, agent)
}

/// Project all three agents of a session, in pipeline order.
pub fn project_session(events: &[SessionEvent]) -> WorkflowProjection {
    let normalized = normalize_events(events);
    projection::project_session(&normalized)
}

/// Filter and summarize raw events for the monitor view.
pub fn monitor_events(events: &[SessionEvent], filter: &EventFilter) -> MonitorReport {
    let normalized = normalize_events(events);
    monitor::monitor(&normalized, filter)
}

/// Build the patient roster from the fetched API payloads.
pub fn build_roster(sources: RosterSources) -> Roster {
    roster::build(sources)
}
