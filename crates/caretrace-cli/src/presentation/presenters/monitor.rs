use crate::presentation::formatters::format_timestamp;
use crate::presentation::view_models::{
    CommandResultViewModel, Guidance, MonitorFilterSummary, MonitorRow, MonitorSummaryViewModel,
    MonitorViewModel, StatusBadge,
};
use caretrace_engine::{MonitorReport, MonitorSummary};
use caretrace_types::NormalizedEvent;
use chrono_tz::Tz;

/// Where the monitored events came from.
#[derive(Debug, Clone, Default)]
pub struct MonitorScope {
    pub user_id: Option<i64>,
    pub session_id: Option<i64>,
    pub source: Option<String>,
}

pub fn present_monitor(
    scope: MonitorScope,
    filters: MonitorFilterSummary,
    report: &MonitorReport,
    tz: Tz,
) -> CommandResultViewModel<MonitorViewModel> {
    let summary = present_summary(&report.summary);
    let events = report.events.iter().map(|event| present_row(event, tz)).collect();

    let widen = (!filters.is_empty()).then(|| widen_command(&scope));
    let content = MonitorViewModel {
        user_id: scope.user_id,
        session_id: scope.session_id,
        source: scope.source,
        filters,
        summary,
        events,
    };

    let mut result = CommandResultViewModel::new(content);
    let summary = &result.content.summary;

    let badge = if summary.total == 0 {
        StatusBadge::info("No data")
    } else if summary.high > 0 || summary.anomalies > 0 {
        StatusBadge::warning(format!(
            "{} event(s): {} high risk, {} anomal{}",
            summary.total,
            summary.high,
            summary.anomalies,
            if summary.anomalies == 1 { "y" } else { "ies" }
        ))
    } else {
        StatusBadge::success(format!("{} event(s), none high risk", summary.total))
    };
    let empty = summary.total == 0;
    result = result.with_badge(badge);

    if let Some(command) = widen
        && empty
    {
        result = result.with_suggestion(
            Guidance::new("No event matched the filters; drop them to see everything")
                .with_command(command),
        );
    }

    result
}

/// Events API failed: empty table with the reason.
pub fn present_monitor_unavailable(
    scope: MonitorScope,
    filters: MonitorFilterSummary,
    error: &str,
) -> CommandResultViewModel<MonitorViewModel> {
    let content = MonitorViewModel {
        user_id: scope.user_id,
        session_id: scope.session_id,
        source: scope.source,
        filters,
        summary: MonitorSummaryViewModel::default(),
        events: Vec::new(),
    };

    CommandResultViewModel::new(content)
        .with_badge(StatusBadge::warning(format!("Events unavailable: {}", error)))
        .with_suggestion(
            Guidance::new("Check the events API address").with_command("caretrace config show"),
        )
}

fn widen_command(scope: &MonitorScope) -> String {
    match (scope.user_id, scope.session_id, scope.source.as_deref()) {
        (_, _, Some(source)) if source != "api" => format!("caretrace monitor --input {}", source),
        (Some(user), Some(session), _) => {
            format!("caretrace monitor --user {} --session {}", user, session)
        }
        (Some(user), None, _) => format!("caretrace monitor --user {}", user),
        _ => "caretrace monitor --help".to_string(),
    }
}

fn present_summary(summary: &MonitorSummary) -> MonitorSummaryViewModel {
    MonitorSummaryViewModel {
        total: summary.total,
        anomalies: summary.anomalies,
        low: summary.risk.low,
        medium: summary.risk.medium,
        high: summary.risk.high,
        by_agent: summary.by_agent.clone(),
    }
}

fn present_row(event: &NormalizedEvent, tz: Tz) -> MonitorRow {
    MonitorRow {
        timestamp: format_timestamp(event.display_timestamp().as_deref(), tz),
        user_id: event.user_id,
        session_id: event.session_id,
        agent_name: event
            .agent_name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| "-".to_string()),
        agent: event.bucket.key().to_string(),
        event: event.kind.label().to_string(),
        risk: event.risk.as_str().to_string(),
        anomaly: event.anomaly,
        input: event.input_data.clone(),
        output: event.output_data.clone(),
        summary: event.summary.clone(),
    }
}
