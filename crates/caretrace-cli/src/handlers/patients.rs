use crate::presentation::presenters;
use crate::presentation::{ConsoleRenderer, OutputFormat, Renderer, ViewMode};
use anyhow::Result;
use caretrace_runtime::CareTrace;
use tracing::warn;

pub async fn handle(workspace: &CareTrace, format: OutputFormat, view_mode: ViewMode) -> Result<()> {
    let tz = workspace.config().tz()?;

    let view_model = match workspace.patients().roster().await {
        Ok(report) => presenters::present_patients(&report, tz),
        Err(err) if err.is_network() => {
            warn!(error = %err, "patient preferences unavailable");
            presenters::present_patients_unavailable(&err.to_string())
        }
        Err(err) => return Err(err.into()),
    };

    let renderer = ConsoleRenderer::new(format, view_mode);
    renderer.render(view_model)?;

    Ok(())
}
