//! Monitoring: filter events across sessions and aggregate risk/anomaly counts.

mod filter;
mod summary;

pub use filter::{filter_events, DateBound, EventFilter};
pub use summary::{summarize, MonitorSummary, RiskCounts};

use caretrace_types::NormalizedEvent;
use serde::Serialize;

/// Filtered rows (newest first) and the aggregates computed over them.
#[derive(Debug, Clone, Serialize)]
pub struct MonitorReport {
    pub summary: MonitorSummary,
    pub events: Vec<NormalizedEvent>,
}

/// Filter normalized events and summarize what survives.
pub fn monitor(events: &[NormalizedEvent], filter: &EventFilter) -> MonitorReport {
    let rows = filter_events(events, filter);
    MonitorReport {
        summary: summarize(&rows),
        events: rows,
    }
}
