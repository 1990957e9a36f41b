use std::fmt;

use super::{heading, status_marker};
use crate::presentation::formatters::text::compact_json;
use crate::presentation::view_models::{
    AgentProgressViewModel, CreateView, ProgressViewModel, StageViewModel, ViewMode,
};
use owo_colors::{OwoColorize, Stream::Stdout};

const TITLE_WIDTH: usize = 28;

impl CreateView for ProgressViewModel {
    fn create_view<'a>(&'a self, mode: ViewMode) -> Box<dyn fmt::Display + 'a> {
        Box::new(ProgressView { data: self, mode })
    }
}

struct ProgressView<'a> {
    data: &'a ProgressViewModel,
    mode: ViewMode,
}

impl<'a> fmt::Display for ProgressView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(session) = &self.data.session else {
            if self.data.agents.is_empty() {
                return writeln!(f, "No session selected.");
            }
            if self.mode != ViewMode::Minimal
                && let Some(source) = &self.data.source
            {
                writeln!(f, "Events from {}", source)?;
                writeln!(f)?;
            }
            return self.write_agents(f);
        };

        if self.mode != ViewMode::Minimal {
            write!(f, "Session {} · user {}", session.session_id, session.user_id)?;
            if let Some(nickname) = &session.nickname {
                write!(f, " ({})", nickname)?;
            }
            writeln!(f)?;
            writeln!(f)?;
        }

        if self.data.agents.is_empty() {
            return writeln!(f, "No data");
        }
        self.write_agents(f)
    }
}

impl<'a> ProgressView<'a> {
    fn write_agents(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for agent in &self.data.agents {
            match self.mode {
                ViewMode::Minimal => write_minimal(f, agent)?,
                ViewMode::Compact => write_compact(f, agent)?,
                ViewMode::Standard | ViewMode::Verbose => {
                    write_tree(f, agent, self.mode == ViewMode::Verbose)?;
                    writeln!(f)?;
                }
            }
        }

        if self.data.unknown_events > 0 && self.mode != ViewMode::Minimal {
            writeln!(
                f,
                "{} event(s) from unknown agents not shown",
                self.data.unknown_events
            )?;
        }
        Ok(())
    }
}

fn write_minimal(f: &mut fmt::Formatter<'_>, agent: &AgentProgressViewModel) -> fmt::Result {
    let state = if agent.is_active { "active" } else { "idle" };
    writeln!(
        f,
        "{}\t{}\t{}",
        agent.agent,
        state,
        agent.active_stage.as_deref().unwrap_or("-")
    )
}

fn write_compact(f: &mut fmt::Formatter<'_>, agent: &AgentProgressViewModel) -> fmt::Result {
    let markers: String = agent
        .stages
        .iter()
        .map(|stage| status_marker(&stage.status))
        .collect();
    write!(
        f,
        "{:<18} {} {}/{}",
        agent.display_name, markers, agent.finished_stages, agent.total_stages
    )?;
    if agent.is_active
        && let Some(stage) = &agent.active_stage
    {
        write!(f, "  ▶ {}", stage)?;
    }
    writeln!(f)
}

fn write_tree(
    f: &mut fmt::Formatter<'_>,
    agent: &AgentProgressViewModel,
    verbose: bool,
) -> fmt::Result {
    write!(f, "{}", heading(&agent.display_name))?;
    write!(
        f,
        "  ({} events, {}/{} stages)",
        agent.event_count, agent.finished_stages, agent.total_stages
    )?;
    if agent.is_active {
        write!(f, "  {}", "▶ active".if_supports_color(Stdout, |t| t.yellow()))?;
    }
    writeln!(f)?;

    for stage in &agent.stages {
        write_stage(f, stage, 1, verbose)?;
    }
    Ok(())
}

fn write_stage(
    f: &mut fmt::Formatter<'_>,
    stage: &StageViewModel,
    depth: usize,
    verbose: bool,
) -> fmt::Result {
    let indent = "  ".repeat(depth * 2 - 1);
    let width = TITLE_WIDTH.saturating_sub(indent.len());
    write!(
        f,
        "{}{} {:<width$}",
        indent,
        status_marker(&stage.status),
        stage.title,
        width = width
    )?;
    if let Some(timestamp) = &stage.timestamp {
        write!(f, " {}", timestamp.if_supports_color(Stdout, |t| t.dimmed()))?;
    }
    if stage.is_active {
        write!(f, "  {}", "◀".if_supports_color(Stdout, |t| t.yellow()))?;
    }
    writeln!(f)?;

    if verbose && let Some(output) = &stage.output {
        writeln!(f, "{}    output: {}", indent, compact_json(output))?;
    }

    for child in &stage.children {
        write_stage(f, child, depth + 1, verbose)?;
    }
    Ok(())
}
