use crate::presentation::formatters::format_timestamp;
use crate::presentation::view_models::{
    AgentProgressViewModel, CommandResultViewModel, Guidance, ProgressViewModel, SessionHeader,
    StageViewModel, StatusBadge,
};
use caretrace_engine::{AgentProgress, WorkflowProjection};
use caretrace_types::{Agent, SessionRef, StagePath, StepNode};
use chrono_tz::Tz;

pub fn present_no_session() -> CommandResultViewModel<ProgressViewModel> {
    let content = ProgressViewModel {
        session: None,
        source: None,
        focus: None,
        agents: Vec::new(),
        unknown_events: 0,
    };

    CommandResultViewModel::new(content)
        .with_badge(StatusBadge::info("No session selected."))
        .with_suggestion(
            Guidance::new("Pick a session by user and session id")
                .with_command("caretrace progress --user <id> --session <id>"),
        )
        .with_suggestion(
            Guidance::new("Or project a saved events dump")
                .with_command("caretrace progress --input events.json"),
        )
}

/// Present a session projection, optionally narrowed to one agent.
pub fn present_progress(
    session: Option<&SessionRef>,
    source: &str,
    projection: &WorkflowProjection,
    only: Option<Agent>,
    tz: Tz,
) -> CommandResultViewModel<ProgressViewModel> {
    let selected: Vec<&AgentProgress> = projection
        .agents
        .iter()
        .filter(|progress| only.is_none_or(|agent| progress.agent == agent))
        .collect();

    let focus = match only {
        Some(agent) => projection
            .agent(agent)
            .filter(|progress| progress.is_active)
            .map(|progress| progress.agent),
        None => projection.focus,
    };

    let content = ProgressViewModel {
        session: session.map(header),
        source: Some(source.to_string()),
        focus: focus.map(|agent| agent.key().to_string()),
        agents: selected.iter().map(|progress| present_agent(progress, tz)).collect(),
        unknown_events: projection.unknown_events,
    };

    let mut result = CommandResultViewModel::new(content);

    if result.content.total_events() == 0 {
        result = result.with_badge(StatusBadge::info("No data"));
        if let Some(session) = session {
            result = result.with_suggestion(
                Guidance::new("List every event recorded for this user")
                    .with_command(format!("caretrace monitor --user {}", session.user_id)),
            );
        }
        return result;
    }

    let focused = focus.and_then(|agent| projection.agent(agent));
    match focused {
        Some(progress) => {
            let stage = progress
                .active_stage()
                .map(|stage| stage.title.as_str())
                .unwrap_or("-");
            result = result.with_badge(StatusBadge::info(format!(
                "{} in progress: {}",
                progress.display_name, stage
            )));
        }
        None => {
            result = result.with_badge(StatusBadge::success("No stage in progress"));
        }
    }

    if projection.unknown_events > 0 && only.is_none() {
        result = result.with_suggestion(
            Guidance::new(format!(
                "{} event(s) came from agents outside the pipeline; inspect them with monitor",
                projection.unknown_events
            ))
            .with_command(match session {
                Some(session) => format!(
                    "caretrace monitor --user {} --session {} --agent unknown",
                    session.user_id, session.session_id
                ),
                None => format!("caretrace monitor --input {} --agent unknown", source),
            }),
        );
    }

    result
}

/// Events API failed: empty view with the reason.
pub fn present_progress_unavailable(
    session: &SessionRef,
    error: &str,
) -> CommandResultViewModel<ProgressViewModel> {
    let content = ProgressViewModel {
        session: Some(header(session)),
        source: Some("api".to_string()),
        focus: None,
        agents: Vec::new(),
        unknown_events: 0,
    };

    CommandResultViewModel::new(content)
        .with_badge(StatusBadge::warning(format!(
            "Session events unavailable: {}",
            error
        )))
        .with_suggestion(
            Guidance::new("Check the events API address").with_command("caretrace config show"),
        )
}

fn header(session: &SessionRef) -> SessionHeader {
    SessionHeader {
        user_id: session.user_id,
        session_id: session.session_id,
        nickname: session.nickname.clone(),
    }
}

fn present_agent(progress: &AgentProgress, tz: Tz) -> AgentProgressViewModel {
    let active = progress.active.as_ref();
    let stages = progress
        .stages
        .iter()
        .enumerate()
        .map(|(index, stage)| present_stage(stage, vec![index], active, tz))
        .collect();

    AgentProgressViewModel {
        agent: progress.agent.key().to_string(),
        display_name: progress.display_name.to_string(),
        event_count: progress.event_count,
        is_active: progress.is_active,
        finished_stages: progress.finished_count(),
        total_stages: progress.stages.len(),
        active_stage: progress.active_stage().map(|stage| stage.title.clone()),
        stages,
    }
}

fn present_stage(
    node: &StepNode,
    path: Vec<usize>,
    active: Option<&StagePath>,
    tz: Tz,
) -> StageViewModel {
    let children = node
        .children
        .iter()
        .enumerate()
        .map(|(index, child)| {
            let mut child_path = path.clone();
            child_path.push(index);
            present_stage(child, child_path, active, tz)
        })
        .collect();

    StageViewModel {
        title: node.title.clone(),
        key: node.event_key.clone(),
        status: node.status.as_str().to_string(),
        timestamp: node
            .timestamp
            .as_deref()
            .map(|ts| format_timestamp(Some(ts), tz)),
        is_active: active.is_some_and(|active| active.indices() == path.as_slice()),
        children,
        output: node.raw_output.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::StatusLevel;
    use caretrace_engine::project_session;
    use caretrace_testing::fixtures;

    fn session() -> SessionRef {
        SessionRef::new(fixtures::USER_ID, fixtures::SESSION_ID).with_nickname(Some("amal".into()))
    }

    #[test]
    fn test_present_in_progress_session() {
        let projection = project_session(&fixtures::assessment_in_progress());
        let result = present_progress(Some(&session()), "api", &projection, None, chrono_tz::UTC);

        let badge = result.badge.as_ref().unwrap();
        assert_eq!(badge.level, StatusLevel::Info);
        assert_eq!(badge.label, "Assessment Agent in progress: PHQ in progress");

        let content = &result.content;
        assert_eq!(content.focus.as_deref(), Some("assessment"));
        assert_eq!(content.agents.len(), 3);

        let assessment = &content.agents[0];
        assert_eq!(assessment.active_stage.as_deref(), Some("PHQ in progress"));
        let phq = &assessment.stages[2];
        assert!(phq.is_active);
        assert_eq!(phq.status, "process");
        assert_eq!(phq.children.len(), 3);
        assert!(phq.children.iter().all(|child| !child.is_active));
    }

    #[test]
    fn test_single_agent_focus() {
        let projection = project_session(&fixtures::assessment_in_progress());
        let result = present_progress(
            Some(&session()),
            "api",
            &projection,
            Some(Agent::Classifier),
            chrono_tz::UTC,
        );

        assert_eq!(result.content.agents.len(), 1);
        assert_eq!(result.content.agents[0].agent, "classifier");
        assert_eq!(result.content.focus, None);
        assert_eq!(result.badge.unwrap().level, StatusLevel::Success);
    }

    #[test]
    fn test_empty_session_is_no_data() {
        let projection = project_session(&[]);
        let result = present_progress(Some(&session()), "api", &projection, None, chrono_tz::UTC);

        assert_eq!(result.badge.unwrap().label, "No data");
        assert_eq!(
            result.suggestions[0].command.as_deref(),
            Some("caretrace monitor --user 7")
        );
    }

    #[test]
    fn test_no_session_placeholder() {
        let result = present_no_session();
        assert_eq!(result.badge.unwrap().label, "No session selected.");
        assert!(result.content.agents.is_empty());
    }
}
