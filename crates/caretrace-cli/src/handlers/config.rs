use crate::args::ConfigSetArgs;
use crate::presentation::presenters;
use crate::presentation::{ConsoleRenderer, OutputFormat, Renderer, ViewMode};
use anyhow::Result;
use caretrace_runtime::Config;
use caretrace_runtime::config::{ENV_API_BASE, ENV_EVENTS_BASE, ENV_TOKEN};
use std::path::Path;

pub fn show(data_dir: &Path, format: OutputFormat) -> Result<()> {
    let path = Config::path_in(data_dir);
    let exists = path.exists();
    let config = Config::load_from(&path)?.with_env_overrides();

    let overrides: Vec<String> = [ENV_API_BASE, ENV_EVENTS_BASE, ENV_TOKEN]
        .into_iter()
        .filter(|key| std::env::var(key).is_ok_and(|value| !value.trim().is_empty()))
        .map(str::to_string)
        .collect();

    let view_model = presenters::present_config(&path, exists, &config, overrides);
    ConsoleRenderer::new(format, ViewMode::default()).render(view_model)
}

/// Update the file itself; environment overrides are not persisted.
pub fn set(data_dir: &Path, args: ConfigSetArgs, format: OutputFormat) -> Result<()> {
    let path = Config::path_in(data_dir);
    let exists = path.exists();
    let mut config = Config::load_from(&path)?;
    let renderer = ConsoleRenderer::new(format, ViewMode::default());

    if args.is_empty() {
        let view_model = presenters::present_config_unchanged(&path, exists, &config);
        return renderer.render(view_model);
    }

    let mut updated = Vec::new();
    if let Some(api_base) = args.api_base {
        config.api_base = api_base;
        updated.push("api_base".to_string());
    }
    if let Some(events_base) = args.events_base {
        config.events_base = Some(events_base).filter(|value| !value.trim().is_empty());
        updated.push("events_base".to_string());
    }
    if let Some(token) = args.token {
        config.token = Some(token).filter(|value| !value.trim().is_empty());
        updated.push("token".to_string());
    }
    if let Some(timezone) = args.timezone {
        config.timezone = timezone;
        updated.push("timezone".to_string());
    }
    if let Some(timeout_secs) = args.timeout_secs {
        config.timeout_secs = timeout_secs;
        updated.push("timeout_secs".to_string());
    }

    config.validate()?;
    config.save_to(&path)?;

    let view_model = presenters::present_config_written(&path, &config, updated);
    renderer.render(view_model)
}
