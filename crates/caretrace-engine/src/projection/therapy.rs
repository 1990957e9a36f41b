use caretrace_types::{EventKind, NormalizedEvent, StepNode, StepStatus};

const DEFAULT_THERAPY_NAME: &str = "Therapy";

// NOTE: Monotone milestones
//
// The therapy agent does not always emit every milestone (a session may jump
// straight to THERAPY_IN_PROGRESS). A later milestone therefore implies every
// earlier one:
//   suggested <- started <- in progress <- ended
// Each child is derived from the furthest milestone reached, never from the
// presence of its own tag alone.

/// Stages of the therapy agent: one top-level node per therapy, ordered by
/// the therapy's earliest event.
pub(super) fn build_stages(events: &[&NormalizedEvent]) -> Vec<StepNode> {
    group_by_therapy(events)
        .into_iter()
        .map(|(name, events)| therapy_node(&name, &events))
        .collect()
}

fn group_by_therapy<'a>(events: &[&'a NormalizedEvent]) -> Vec<(String, Vec<&'a NormalizedEvent>)> {
    let mut groups: Vec<(String, Vec<&'a NormalizedEvent>)> = Vec::new();
    for event in events.iter().copied() {
        let name = event
            .therapy_name
            .as_deref()
            .unwrap_or(DEFAULT_THERAPY_NAME);
        match groups.iter_mut().find(|(existing, _)| existing.as_str() == name) {
            Some((_, members)) => members.push(event),
            None => groups.push((name.to_string(), vec![event])),
        }
    }
    groups
}

fn therapy_node(name: &str, events: &[&NormalizedEvent]) -> StepNode {
    let key = format!("therapy_{}", slug(name));
    let first_of = |kind: EventKind| events.iter().copied().find(|e| e.has_kind(&kind));

    let suggested = first_of(EventKind::TherapySuggested);
    let started = first_of(EventKind::TherapyStarted);
    let ended = first_of(EventKind::TherapyEnded);
    let updates: Vec<&NormalizedEvent> = events
        .iter()
        .copied()
        .filter(|e| e.has_kind(&EventKind::TherapyInProgress))
        .collect();

    let is_ended = ended.is_some();
    let is_running = started.is_some() || !updates.is_empty();
    let any_milestone = suggested.is_some() || is_running || is_ended;

    let update_nodes = updates
        .iter()
        .enumerate()
        .map(|(index, event)| {
            StepNode::new(
                format!("Update {}", index + 1),
                format!("{}_progress_{}", key, index + 1),
                StepStatus::Finish,
            )
            .with_timestamp(event.display_timestamp())
            .with_raw_output(event.output_data.clone())
        })
        .collect();

    let progress_title = if updates.is_empty() {
        "Progress".to_string()
    } else {
        format!("Progress ({})", updates.len())
    };

    let children = vec![
        milestone(
            "Suggested",
            format!("{}_suggested", key),
            StepStatus::from_flags(any_milestone, false),
            suggested,
        ),
        milestone(
            "Started",
            format!("{}_started", key),
            StepStatus::from_flags(is_running || is_ended, false),
            started,
        ),
        StepNode::new(
            progress_title,
            format!("{}_progress", key),
            StepStatus::from_flags(is_ended, is_running),
        )
        .with_timestamp(updates.last().and_then(|e| e.display_timestamp()))
        .with_children(update_nodes),
        milestone(
            "Completed",
            format!("{}_completed", key),
            StepStatus::from_flags(is_ended, false),
            ended,
        ),
    ];

    StepNode::new(name, key, StepStatus::from_flags(is_ended, true))
        .with_timestamp(events.first().and_then(|e| e.display_timestamp()))
        .with_children(children)
}

fn milestone(
    title: &str,
    key: String,
    status: StepStatus,
    event: Option<&NormalizedEvent>,
) -> StepNode {
    StepNode::new(title, key, status)
        .with_timestamp(event.and_then(|e| e.display_timestamp()))
        .with_raw_output(event.and_then(|e| e.output_data.clone()))
}

fn slug(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}
