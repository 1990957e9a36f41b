use crate::args::MonitorArgs;
use crate::presentation::presenters::{self, MonitorScope};
use crate::presentation::view_models::MonitorFilterSummary;
use crate::presentation::{ConsoleRenderer, OutputFormat, Renderer};
use anyhow::Result;
use caretrace_engine::{DateBound, EventFilter, monitor_events};
use caretrace_runtime::{CareTrace, read_events_file};
use caretrace_types::RiskLevel;
use tracing::warn;

pub async fn handle(workspace: &CareTrace, args: MonitorArgs, format: OutputFormat) -> Result<()> {
    let tz = workspace.config().tz()?;
    let filter = build_filter(&args)?;
    let filters = MonitorFilterSummary {
        agent: args.agent.clone(),
        risk: filter.risk.map(|risk| risk.as_str().to_string()),
        search: args.search.clone(),
        since: args.since.clone(),
        until: args.until.clone(),
    };

    let view_model = match &args.input {
        Some(path) => {
            let mut events = read_events_file(path)?;
            events.retain(|event| {
                let user_matches = args
                    .user
                    .is_none_or(|user| event.user_id == 0 || event.user_id == user);
                let session_matches = args
                    .session
                    .is_none_or(|session| event.session_id == 0 || event.session_id == session);
                user_matches && session_matches
            });
            let scope = MonitorScope {
                user_id: args.user,
                session_id: args.session,
                source: Some(path.display().to_string()),
            };
            let report = monitor_events(&events, &filter);
            presenters::present_monitor(scope, filters, &report, tz)
        }
        None => {
            let scope = MonitorScope {
                user_id: args.user,
                session_id: args.session,
                source: Some("api".to_string()),
            };
            // clap requires --user whenever --input is absent
            let user = args.user.unwrap_or_default();
            match workspace.monitor().load(user, args.session, &filter).await {
                Ok(report) => presenters::present_monitor(scope, filters, &report, tz),
                Err(err) if err.is_network() => {
                    warn!(error = %err, "events unavailable");
                    presenters::present_monitor_unavailable(scope, filters, &err.to_string())
                }
                Err(err) => return Err(err.into()),
            }
        }
    };

    let renderer = ConsoleRenderer::new(format, args.view.resolve());
    renderer.render(view_model)?;

    Ok(())
}

fn build_filter(args: &MonitorArgs) -> Result<EventFilter> {
    let mut filter = EventFilter::new();
    if let Some(agent) = &args.agent {
        filter = filter.agent(agent.clone());
    }
    if let Some(risk) = args.risk {
        filter = filter.risk(RiskLevel::from(risk));
    }
    if let Some(search) = &args.search {
        filter = filter.search(search.clone());
    }
    if let Some(since) = &args.since {
        filter = filter.since(DateBound::Since.parse(since)?);
    }
    if let Some(until) = &args.until {
        filter = filter.until(DateBound::Until.parse(until)?);
    }
    Ok(filter)
}
