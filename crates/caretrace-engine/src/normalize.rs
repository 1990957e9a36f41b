use caretrace_types::{Agent, AgentBucket, NormalizedEvent, SessionEvent, SessionRef};

/// Normalize raw events and order them by timestamp.
///
/// The sort is stable: events with equal timestamps keep their feed order,
/// and events whose timestamp is missing or malformed go last, in feed order.
pub fn normalize_events(events: &[SessionEvent]) -> Vec<NormalizedEvent> {
    let mut normalized: Vec<NormalizedEvent> = events
        .iter()
        .enumerate()
        .map(|(sequence, event)| NormalizedEvent::from_event(event, sequence))
        .collect();
    sort_chronologically(&mut normalized);
    normalized
}

pub(crate) fn sort_chronologically(events: &mut [NormalizedEvent]) {
    events.sort_by_key(|event| (event.timestamp.is_none(), event.timestamp, event.sequence));
}

/// Keep the events belonging to one session.
///
/// A zero id means the producer omitted it; such events are kept rather than
/// silently dropped.
pub fn events_for_session(events: Vec<SessionEvent>, session: &SessionRef) -> Vec<SessionEvent> {
    events
        .into_iter()
        .filter(|event| event.user_id == 0 || event.user_id == session.user_id)
        .filter(|event| event.session_id == 0 || event.session_id == session.session_id)
        .collect()
}

/// Events split into the three agent buckets plus the unmapped remainder.
#[derive(Debug, Default)]
pub struct AgentGroups<'a> {
    pub assessment: Vec<&'a NormalizedEvent>,
    pub classifier: Vec<&'a NormalizedEvent>,
    pub therapy: Vec<&'a NormalizedEvent>,
    /// Events no agent renders
    pub unknown: Vec<&'a NormalizedEvent>,
}

impl<'a> AgentGroups<'a> {
    pub fn get(&self, agent: Agent) -> &[&'a NormalizedEvent] {
        match agent {
            Agent::Assessment => &self.assessment,
            Agent::Classifier => &self.classifier,
            Agent::Therapy => &self.therapy,
        }
    }
}

/// Group events by agent bucket, preserving their relative order.
pub fn group_by_agent(events: &[NormalizedEvent]) -> AgentGroups<'_> {
    let mut groups = AgentGroups::default();
    for event in events {
        match event.bucket {
            AgentBucket::Agent(Agent::Assessment) => groups.assessment.push(event),
            AgentBucket::Agent(Agent::Classifier) => groups.classifier.push(event),
            AgentBucket::Agent(Agent::Therapy) => groups.therapy.push(event),
            AgentBucket::Unknown => groups.unknown.push(event),
        }
    }
    groups
}
