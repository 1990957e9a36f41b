use crate::presentation::presenters;
use crate::presentation::{ConsoleRenderer, OutputFormat, Renderer, ViewMode};
use anyhow::Result;
use caretrace_runtime::CareTrace;
use tracing::{info, warn};

pub async fn list(workspace: &CareTrace, format: OutputFormat) -> Result<()> {
    let view_model = match workspace.patients().comments().await {
        Ok(comments) => presenters::present_comment_list(&comments),
        Err(err) if err.is_network() => {
            warn!(error = %err, "doctor comments unavailable");
            presenters::present_comment_list_unavailable(&err.to_string())
        }
        Err(err) => return Err(err.into()),
    };

    ConsoleRenderer::new(format, ViewMode::default()).render(view_model)
}

/// Validation and API failures both abort: nothing was saved.
pub async fn add(
    workspace: &CareTrace,
    user_id: i64,
    level: &str,
    comment: &str,
    format: OutputFormat,
) -> Result<()> {
    let body = workspace.patients().annotate(user_id, level, comment).await?;
    info!(user_id, level = %body.level, "doctor comment saved");

    let view_model = presenters::present_comment_added(&body);
    ConsoleRenderer::new(format, ViewMode::default()).render(view_model)
}
