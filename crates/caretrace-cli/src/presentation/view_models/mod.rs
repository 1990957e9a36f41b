mod comment;
mod common;
mod config;
mod monitor;
mod patients;
mod progress;
mod result;

pub use comment::{CommentAddedViewModel, CommentEntry, CommentListViewModel};
pub use common::{Guidance, OutputFormat, StatusBadge, StatusLevel, ViewMode};
pub use config::{ConfigViewModel, ConfigWriteViewModel};
pub use monitor::{MonitorFilterSummary, MonitorRow, MonitorSummaryViewModel, MonitorViewModel};
pub use patients::{LevelCountsViewModel, PatientEntry, PatientListViewModel};
pub use progress::{AgentProgressViewModel, ProgressViewModel, SessionHeader, StageViewModel};
pub use result::CommandResultViewModel;

use std::fmt;

/// Text rendering of a view model for a given `ViewMode`.
pub trait CreateView {
    fn create_view<'a>(&'a self, mode: ViewMode) -> Box<dyn fmt::Display + 'a>;
}
