use crate::presentation::view_models::{
    CommandResultViewModel, ConfigViewModel, ConfigWriteViewModel, Guidance, StatusBadge,
};
use caretrace_runtime::Config;
use std::path::Path;

pub fn present_config(
    path: &Path,
    exists: bool,
    config: &Config,
    env_overrides: Vec<String>,
) -> CommandResultViewModel<ConfigViewModel> {
    let content = config_view(path, exists, config, env_overrides);
    let mut result = CommandResultViewModel::new(content);

    if !exists {
        result = result
            .with_badge(StatusBadge::info("No config file; using defaults"))
            .with_suggestion(
                Guidance::new("Point caretrace at your API")
                    .with_command("caretrace config set --api-base https://... --token <token>"),
            );
    } else if config.token.is_none() {
        result = result.with_suggestion(
            Guidance::new("The patient and comment APIs need a bearer token")
                .with_command("caretrace config set --token <token>"),
        );
    }

    result
}

pub fn present_config_written(
    path: &Path,
    config: &Config,
    updated: Vec<String>,
) -> CommandResultViewModel<ConfigWriteViewModel> {
    let label = format!("Updated {}", updated.join(", "));
    CommandResultViewModel::new(ConfigWriteViewModel {
        config: config_view(path, true, config, Vec::new()),
        updated,
    })
    .with_badge(StatusBadge::success(label))
}

pub fn present_config_unchanged(
    path: &Path,
    exists: bool,
    config: &Config,
) -> CommandResultViewModel<ConfigWriteViewModel> {
    CommandResultViewModel::new(ConfigWriteViewModel {
        config: config_view(path, exists, config, Vec::new()),
        updated: Vec::new(),
    })
    .with_badge(StatusBadge::info("Nothing to update"))
    .with_suggestion(
        Guidance::new("See the available keys").with_command("caretrace config set --help"),
    )
}

fn config_view(
    path: &Path,
    exists: bool,
    config: &Config,
    env_overrides: Vec<String>,
) -> ConfigViewModel {
    ConfigViewModel {
        path: path.display().to_string(),
        exists,
        api_base: config.api_base.clone(),
        events_base: config.events_base().to_string(),
        token: config.masked_token(),
        timeout_secs: config.timeout_secs,
        timezone: config.timezone.clone(),
        env_overrides,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_token_is_masked() {
        let config = Config {
            token: Some("super-secret-9876".to_string()),
            ..Config::default()
        };
        let result = present_config(Path::new("/tmp/config.toml"), true, &config, Vec::new());

        assert_eq!(result.content.token.as_deref(), Some("****9876"));
        assert_eq!(result.content.events_base, "http://localhost:8000");
        assert!(result.badge.is_none());
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn test_written_badge_lists_keys() {
        let result = present_config_written(
            Path::new("/tmp/config.toml"),
            &Config::default(),
            vec!["api_base".to_string(), "token".to_string()],
        );
        assert_eq!(result.badge.unwrap().label, "Updated api_base, token");
    }
}
