use crate::{Error, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
pub const DEFAULT_TIMEZONE: &str = "Asia/Colombo";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_DATA_DIR: &str = "CARETRACE_PATH";
pub const ENV_API_BASE: &str = "CARETRACE_API_BASE";
pub const ENV_EVENTS_BASE: &str = "CARETRACE_EVENTS_BASE";
pub const ENV_TOKEN: &str = "CARETRACE_TOKEN";

/// Resolve the data directory path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. CARETRACE_PATH environment variable (with tilde expansion)
/// 3. XDG data directory (recommended default)
/// 4. ~/.caretrace (fallback for systems without XDG)
pub fn resolve_data_dir(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var(ENV_DATA_DIR) {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join("caretrace"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".caretrace"));
    }

    Err(Error::Config(
        "Could not determine data directory: no HOME directory or XDG data directory found"
            .to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the user, level and comment APIs
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Base URL of the events API; falls back to `api_base`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events_base: Option<String>,

    /// Bearer token for the level and comment APIs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// IANA zone used to display timestamps
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            events_base: None,
            token: None,
            timeout_secs: default_timeout_secs(),
            timezone: default_timezone(),
        }
    }
}

impl Config {
    pub fn path_in(data_dir: &Path) -> PathBuf {
        data_dir.join("config.toml")
    }

    /// Load the config file; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply `CARETRACE_*` environment overrides.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(api_base) = value(ENV_API_BASE) {
            self.api_base = api_base;
        }
        if let Some(events_base) = value(ENV_EVENTS_BASE) {
            self.events_base = Some(events_base);
        }
        if let Some(token) = value(ENV_TOKEN) {
            self.token = Some(token);
        }
        self
    }

    pub fn events_base(&self) -> &str {
        self.events_base.as_deref().unwrap_or(&self.api_base)
    }

    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| Error::Config(format!("Unknown timezone '{}'", self.timezone)))
    }

    pub fn validate(&self) -> Result<()> {
        for (name, url) in [("api_base", self.api_base.as_str()), ("events_base", self.events_base())] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(Error::Config(format!(
                    "{} must be an http(s) URL, got '{}'",
                    name, url
                )));
            }
        }
        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be positive".to_string()));
        }
        self.tz()?;
        Ok(())
    }

    /// Token with all but its last four characters hidden.
    pub fn masked_token(&self) -> Option<String> {
        self.token.as_deref().map(|token| {
            let chars: Vec<char> = token.chars().collect();
            if chars.len() <= 4 {
                "****".to_string()
            } else {
                let tail: String = chars[chars.len() - 4..].iter().collect();
                format!("****{}", tail)
            }
        })
    }
}
