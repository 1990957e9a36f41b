use caretrace_types::{EventKind, NormalizedEvent, StepNode, StepStatus};

/// Stages of the classifier agent.
///
/// "Session Ended" settles on the first end-of-session event. "Level
/// Detection" shows the most recent detection, since a later run supersedes
/// the earlier level.
pub(super) fn build_stages(events: &[&NormalizedEvent]) -> Vec<StepNode> {
    let ended = events.iter().find(|e| e.has_kind(&EventKind::SessionEnded));
    let detection = events
        .iter()
        .rev()
        .find(|e| e.has_kind(&EventKind::DepressionDetection));

    vec![
        settled_stage("Session Ended", "session_ended", ended.copied()),
        settled_stage("Level Detection", "level_detection", detection.copied()),
    ]
}

fn settled_stage(title: &str, key: &str, event: Option<&NormalizedEvent>) -> StepNode {
    match event {
        Some(event) => StepNode::new(title, key, StepStatus::Finish)
            .with_timestamp(event.display_timestamp())
            .with_raw_output(event.output_data.clone()),
        None => StepNode::new(title, key, StepStatus::Wait),
    }
}
