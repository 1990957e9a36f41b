use std::path::Path;
use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::Config;
use crate::ops::{MonitorOps, PatientOps, ProgressOps};
use crate::Result;

/// Entry point for every remote operation: the effective config plus a
/// shared API client.
pub struct CareTrace {
    config: Arc<Config>,
    client: Arc<ApiClient>,
}

impl CareTrace {
    /// Load `config.toml` from the data directory, apply environment
    /// overrides and validate the result.
    pub fn open(data_dir: &Path) -> Result<Self> {
        let config = Config::load_from(&Config::path_in(data_dir))?.with_env_overrides();
        Self::with_config(config)
    }

    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        let client = ApiClient::from_config(&config)?;

        Ok(Self {
            config: Arc::new(config),
            client: Arc::new(client),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn progress(&self) -> ProgressOps {
        ProgressOps::new(self.client.clone())
    }

    pub fn monitor(&self) -> MonitorOps {
        MonitorOps::new(self.client.clone())
    }

    pub fn patients(&self) -> PatientOps {
        PatientOps::new(self.client.clone())
    }
}
