use std::fmt;

use super::{heading, risk_label};
use crate::presentation::formatters::{compact_json, truncate};
use crate::presentation::view_models::{CreateView, MonitorRow, MonitorViewModel, ViewMode};
use owo_colors::{OwoColorize, Stream::Stdout};

const DETAIL_WIDTH: usize = 60;

impl CreateView for MonitorViewModel {
    fn create_view<'a>(&'a self, mode: ViewMode) -> Box<dyn fmt::Display + 'a> {
        Box::new(MonitorView { data: self, mode })
    }
}

struct MonitorView<'a> {
    data: &'a MonitorViewModel,
    mode: ViewMode,
}

impl<'a> fmt::Display for MonitorView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mode == ViewMode::Minimal {
            for row in &self.data.events {
                writeln!(f, "{}\t{}\t{}\t{}", row.timestamp, row.agent_name, row.event, row.risk)?;
            }
            return Ok(());
        }

        let summary = &self.data.summary;
        writeln!(
            f,
            "{}  total {}  anomalies {}  risk low/medium/high {}/{}/{}",
            heading("Summary"),
            summary.total,
            summary.anomalies,
            summary.low,
            summary.medium,
            summary.high
        )?;
        if !summary.by_agent.is_empty() {
            let agents: Vec<String> = summary
                .by_agent
                .iter()
                .map(|(agent, count)| format!("{} {}", agent, count))
                .collect();
            writeln!(f, "Agents   {}", agents.join(", "))?;
        }
        writeln!(f)?;

        if self.data.events.is_empty() {
            return writeln!(f, "No data");
        }

        writeln!(
            f,
            "{:<19}  {:<12} {:<22} {:<6} {:<7} DETAIL",
            "TIME", "AGENT", "EVENT", "RISK", "ANOMALY"
        )?;
        for row in &self.data.events {
            write_row(f, row, self.mode)?;
        }
        Ok(())
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, row: &MonitorRow, mode: ViewMode) -> fmt::Result {
    let anomaly = if row.anomaly {
        format!("{:<7}", "yes").if_supports_color(Stdout, |t| t.red()).to_string()
    } else {
        format!("{:<7}", "")
    };

    let detail = if mode == ViewMode::Compact {
        String::new()
    } else {
        row.summary
            .as_ref()
            .or(row.output.as_ref())
            .map(|value| truncate(&compact_json(value), DETAIL_WIDTH))
            .unwrap_or_default()
    };

    writeln!(
        f,
        "{:<19}  {:<12} {:<22} {} {} {}",
        row.timestamp,
        truncate(&row.agent_name, 12),
        truncate(&row.event, 22),
        risk_label(&row.risk),
        anomaly,
        detail
    )?;

    if mode == ViewMode::Verbose {
        for (label, value) in [
            ("input", &row.input),
            ("output", &row.output),
            ("summary", &row.summary),
        ] {
            if let Some(value) = value {
                writeln!(f, "    {}: {}", label, compact_json(value))?;
            }
        }
    }
    Ok(())
}
