use std::fmt;

use crate::presentation::view_models::{
    ConfigViewModel, ConfigWriteViewModel, CreateView, ViewMode,
};

impl CreateView for ConfigViewModel {
    fn create_view<'a>(&'a self, _mode: ViewMode) -> Box<dyn fmt::Display + 'a> {
        Box::new(ConfigView { data: self })
    }
}

struct ConfigView<'a> {
    data: &'a ConfigViewModel,
}

impl<'a> fmt::Display for ConfigView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = self.data;
        let marker = if config.exists { "" } else { " (not found)" };
        writeln!(f, "Config file:  {}{}", config.path, marker)?;
        writeln!(f, "api_base:     {}", config.api_base)?;
        writeln!(f, "events_base:  {}", config.events_base)?;
        writeln!(
            f,
            "token:        {}",
            config.token.as_deref().unwrap_or("(not set)")
        )?;
        writeln!(f, "timeout_secs: {}", config.timeout_secs)?;
        writeln!(f, "timezone:     {}", config.timezone)?;
        if !config.env_overrides.is_empty() {
            writeln!(f, "overridden by {}", config.env_overrides.join(", "))?;
        }
        Ok(())
    }
}

impl CreateView for ConfigWriteViewModel {
    fn create_view<'a>(&'a self, mode: ViewMode) -> Box<dyn fmt::Display + 'a> {
        self.config.create_view(mode)
    }
}
