mod comment;
mod config;
mod monitor;
mod patients;
mod progress;

pub use comment::{present_comment_added, present_comment_list, present_comment_list_unavailable};
pub use config::{present_config, present_config_unchanged, present_config_written};
pub use monitor::{MonitorScope, present_monitor, present_monitor_unavailable};
pub use patients::{present_patients, present_patients_unavailable};
pub use progress::{present_no_session, present_progress, present_progress_unavailable};
