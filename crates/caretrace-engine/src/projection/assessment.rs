use std::collections::BTreeMap;

use caretrace_types::{EventKind, NormalizedEvent, StepNode, StepStatus};

/// Stages of the assessment agent.
///
/// "Session Started" and "Initial Chat" are reached by definition once the
/// agent is being viewed; PHQ-9 and follow-up depend on the events.
pub(super) fn build_stages(events: &[&NormalizedEvent]) -> Vec<StepNode> {
    let started = events
        .iter()
        .find(|e| e.has_kind(&EventKind::SessionStarted))
        .or_else(|| events.first());

    let first_chat = events.iter().find(|e| {
        !e.phq9.is_present()
            && !e.has_kind(&EventKind::SessionStarted)
            && !e.has_kind(&EventKind::FollowUp)
    });

    vec![
        StepNode::new("Session Started", "session_started", StepStatus::Finish)
            .with_timestamp(started.and_then(|e| e.display_timestamp())),
        StepNode::new("Initial Chat", "initial_chat", StepStatus::Finish)
            .with_timestamp(first_chat.and_then(|e| e.display_timestamp())),
        phq9_stage(events),
        follow_up_stage(events),
    ]
}

fn phq9_stage(events: &[&NormalizedEvent]) -> StepNode {
    let phq_events: Vec<&NormalizedEvent> = events
        .iter()
        .copied()
        .filter(|e| e.phq9.is_present() || e.has_kind(&EventKind::Phq9))
        .collect();

    // Events arrive sorted, so the first insert per question is the earliest.
    let mut questions: BTreeMap<u32, &NormalizedEvent> = BTreeMap::new();
    for event in phq_events.iter().copied() {
        if let Some(question_id) = event.phq9.question_id {
            questions.entry(question_id).or_insert(event);
        }
    }

    let children = questions
        .iter()
        .map(|(question_id, event)| {
            StepNode::new(
                format!("PHQ Q{}", question_id),
                format!("phq_question_{}", question_id),
                StepStatus::Finish,
            )
            .with_timestamp(event.display_timestamp())
            .with_raw_output(event.output_data.clone())
        })
        .collect();

    let completion = phq_events.iter().find(|e| e.phq9.completed);
    let status = StepStatus::from_flags(completion.is_some(), !phq_events.is_empty());
    let settled_by = completion.or_else(|| phq_events.first());

    StepNode::new("PHQ in progress", "phq_in_progress", status)
        .with_timestamp(settled_by.and_then(|e| e.display_timestamp()))
        .with_raw_output(completion.and_then(|e| e.output_data.clone()))
        .with_children(children)
}

fn follow_up_stage(events: &[&NormalizedEvent]) -> StepNode {
    match events.iter().find(|e| e.has_kind(&EventKind::FollowUp)) {
        Some(event) => StepNode::new("Follow-up", "follow_up", StepStatus::Finish)
            .with_timestamp(event.display_timestamp())
            .with_raw_output(event.output_data.clone()),
        None => StepNode::new("Follow-up", "follow_up", StepStatus::Wait),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_events;
    use caretrace_testing::{fixtures, EventBuilder};

    fn stages(events: &[caretrace_types::SessionEvent]) -> Vec<StepNode> {
        let normalized = normalize_events(events);
        let refs: Vec<&NormalizedEvent> = normalized.iter().collect();
        build_stages(&refs)
    }

    fn statuses(stages: &[StepNode]) -> Vec<StepStatus> {
        stages.iter().map(|s| s.status).collect()
    }

    #[test]
    fn test_zero_events_only_fixed_stages_finish() {
        let stages = stages(&[]);
        assert_eq!(
            statuses(&stages),
            vec![
                StepStatus::Finish,
                StepStatus::Finish,
                StepStatus::Wait,
                StepStatus::Wait
            ]
        );
        assert!(stages.iter().all(|s| s.timestamp.is_none()));
    }

    #[test]
    fn test_phq_in_progress_lists_answered_questions() {
        let stages = stages(&fixtures::assessment_in_progress());
        let phq = &stages[2];

        assert_eq!(phq.status, StepStatus::Process);
        let titles: Vec<&str> = phq.children.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["PHQ Q1", "PHQ Q2", "PHQ Q3"]);
        assert!(phq.children.iter().all(|c| c.status == StepStatus::Finish));
        assert_eq!(phq.children[0].raw_output.as_ref().unwrap()["answer"], 2);
    }

    #[test]
    fn test_completion_flips_phq_without_reordering() {
        let mut events = fixtures::assessment_in_progress();
        events.push(
            EventBuilder::chat("2025-03-01T10:05:00")
                .phq9_completed()
                .build(),
        );

        let before = stages(&fixtures::assessment_in_progress());
        let after = stages(&events);

        assert_eq!(after[2].status, StepStatus::Finish);
        assert_eq!(after[2].timestamp.as_deref(), Some("2025-03-01T10:05:00"));
        let keys = |s: &StepNode| s.children.iter().map(|c| c.event_key.clone()).collect::<Vec<_>>();
        assert_eq!(keys(&before[2]), keys(&after[2]));
    }

    #[test]
    fn test_questions_sorted_and_deduplicated() {
        let events = vec![
            EventBuilder::chat("2025-03-01T10:03:00").phq9_question(3).build(),
            EventBuilder::chat("2025-03-01T10:01:00")
                .phq9_question(1)
                .output_field("answer", serde_json::json!(0))
                .build(),
            EventBuilder::chat("2025-03-01T10:02:00")
                .phq9_question(1)
                .output_field("answer", serde_json::json!(3))
                .build(),
        ];

        let phq = &stages(&events)[2];
        assert_eq!(phq.children.len(), 2);
        assert_eq!(phq.children[0].event_key, "phq_question_1");
        assert_eq!(phq.children[0].timestamp.as_deref(), Some("2025-03-01T10:01:00"));
        assert_eq!(phq.children[0].raw_output.as_ref().unwrap()["answer"], 0);
    }

    #[test]
    fn test_follow_up_uses_earliest_event() {
        let events = vec![
            EventBuilder::chat("2025-03-01T11:00:00").tag("FOLLOW_UP").build(),
            EventBuilder::chat("2025-03-01T10:30:00").tag("followup").build(),
        ];

        let follow_up = &stages(&events)[3];
        assert_eq!(follow_up.status, StepStatus::Finish);
        assert_eq!(follow_up.timestamp.as_deref(), Some("2025-03-01T10:30:00"));
    }

    #[test]
    fn test_session_started_timestamp_prefers_tagged_event() {
        let stages = stages(&fixtures::assessment_in_progress());
        assert_eq!(stages[0].timestamp.as_deref(), Some("2025-03-01T10:00:00"));
        assert_eq!(stages[1].timestamp.as_deref(), Some("2025-03-01T10:01:00"));
    }
}
