use crate::args::ProgressArgs;
use crate::presentation::presenters;
use crate::presentation::{ConsoleRenderer, OutputFormat, Renderer};
use anyhow::Result;
use caretrace_engine::{events_for_session, project_session};
use caretrace_runtime::{CareTrace, read_events_file};
use caretrace_types::{Agent, SessionRef};
use tracing::{debug, warn};

pub async fn handle(workspace: &CareTrace, args: ProgressArgs, format: OutputFormat) -> Result<()> {
    let tz = workspace.config().tz()?;
    let only = args.agent.map(Agent::from);
    let session = match (args.user, args.session) {
        (Some(user), Some(session)) => {
            Some(SessionRef::new(user, session).with_nickname(args.nickname.clone()))
        }
        _ => None,
    };

    let view_model = match (&args.input, &session) {
        (Some(path), session) => {
            let mut events = read_events_file(path)?;
            if let Some(session) = session {
                events = events_for_session(events, session);
            }
            debug!(path = %path.display(), count = events.len(), "projecting events dump");

            let projection = project_session(&events);
            let source = path.display().to_string();
            presenters::present_progress(session.as_ref(), &source, &projection, only, tz)
        }
        (None, Some(session)) => match workspace.progress().fetch(session).await {
            Ok(events) => {
                let projection = project_session(&events);
                presenters::present_progress(Some(session), "api", &projection, only, tz)
            }
            Err(err) if err.is_network() => {
                warn!(error = %err, "session events unavailable");
                presenters::present_progress_unavailable(session, &err.to_string())
            }
            Err(err) => return Err(err.into()),
        },
        (None, None) => presenters::present_no_session(),
    };

    let renderer = ConsoleRenderer::new(format, args.view.resolve());
    renderer.render(view_model)?;

    Ok(())
}
