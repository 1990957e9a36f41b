use caretrace_engine::{monitor_events, project_agent, project_session, EventFilter};
use caretrace_types::{parse_events_document, Agent, RiskLevel, SessionEvent, StepStatus};
use std::fs;
use std::path::Path;

// Helper to load SessionEvent[] from a saved events API response
fn load_events_from_fixture(fixture_name: &str) -> Vec<SessionEvent> {
    let path = Path::new("tests/fixtures").join(fixture_name);
    let content = fs::read_to_string(&path)
        .unwrap_or_else(|_| panic!("Failed to read fixture: {}", path.display()));
    parse_events_document(&content)
        .unwrap_or_else(|_| panic!("Failed to parse fixture: {}", path.display()))
}

#[test]
fn test_session_projection_from_wire_dump() {
    let events = load_events_from_fixture("session_events.json");
    let projection = project_session(&events);

    assert_eq!(projection.focus, Some(Agent::Assessment));
    assert_eq!(projection.unknown_events, 1);

    let assessment = projection.agent(Agent::Assessment).unwrap();
    assert_eq!(assessment.event_count, 5);
    let phq = &assessment.stages[2];
    assert_eq!(phq.status, StepStatus::Process);
    let questions: Vec<&str> = phq.children.iter().map(|c| c.event_key.as_str()).collect();
    assert_eq!(questions, vec!["phq_question_1", "phq_question_2", "phq_question_3"]);
    assert_eq!(assessment.active_stage().unwrap().title, "PHQ in progress");

    let classifier = projection.agent(Agent::Classifier).unwrap();
    assert_eq!(classifier.stages[0].status, StepStatus::Finish);
    assert_eq!(classifier.stages[0].timestamp.as_deref(), Some("2025-03-02T09:06:00"));
    assert_eq!(classifier.stages[1].status, StepStatus::Wait);
}

#[test]
fn test_missing_timestamp_is_displayed_as_absent() {
    let events = load_events_from_fixture("session_events.json");
    let therapy = project_agent(&events, Agent::Therapy);

    assert_eq!(therapy.stages.len(), 1);
    let breathing = &therapy.stages[0];
    assert_eq!(breathing.title, "Mindful Breathing");
    assert_eq!(breathing.status, StepStatus::Process);
    assert_eq!(breathing.timestamp, None);
    assert_eq!(breathing.children[0].status, StepStatus::Finish);
}

#[test]
fn test_agent_projection_matches_session_projection() {
    let events = load_events_from_fixture("session_events.json");
    let session = project_session(&events);

    for agent in Agent::ALL {
        assert_eq!(
            Some(&project_agent(&events, agent)),
            session.agent(agent),
            "{} differs between projections",
            agent
        );
    }
}

#[test]
fn test_monitor_over_wire_dump() {
    let events = load_events_from_fixture("session_events.json");

    let report = monitor_events(&events, &EventFilter::new());
    assert_eq!(report.summary.total, 8);
    assert_eq!(report.summary.anomalies, 1);
    assert_eq!(report.summary.risk.high, 1);
    assert_eq!(report.events.last().unwrap().raw_timestamp, "");

    let high = monitor_events(&events, &EventFilter::new().risk(RiskLevel::High));
    assert_eq!(high.events.len(), 1);
    assert_eq!(high.events[0].agent_name.as_deref(), Some("monitor"));

    let sleeping = monitor_events(&events, &EventFilter::new().search("SLEEPING"));
    assert_eq!(sleeping.summary.total, 1);
}
