pub mod api;
pub mod config;
pub mod error;
pub mod ops;
mod workspace;

pub use api::ApiClient;
pub use config::{resolve_data_dir, Config};
pub use error::{Error, Result};
pub use ops::{read_events_file, MonitorOps, PatientOps, ProgressOps, RosterReport};
pub use workspace::CareTrace;
