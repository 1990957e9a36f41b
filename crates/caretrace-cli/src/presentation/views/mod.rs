mod comment;
mod config;
mod monitor;
mod patients;
mod progress;

use owo_colors::{OwoColorize, Stream::Stdout};

/// Stage marker: finished, running, not reached.
fn status_marker(status: &str) -> String {
    match status {
        "finish" => "✔".if_supports_color(Stdout, |t| t.green()).to_string(),
        "process" => "●".if_supports_color(Stdout, |t| t.yellow()).to_string(),
        _ => "○".if_supports_color(Stdout, |t| t.dimmed()).to_string(),
    }
}

fn risk_label(risk: &str) -> String {
    let padded = format!("{:<6}", risk);
    match risk {
        "high" => padded.if_supports_color(Stdout, |t| t.red()).to_string(),
        "medium" => padded.if_supports_color(Stdout, |t| t.yellow()).to_string(),
        _ => padded,
    }
}

fn level_label(level: Option<&str>) -> String {
    let Some(level) = level else {
        return format!("{:<9}", "-");
    };
    let padded = format!("{:<9}", level);
    match level.to_ascii_lowercase().as_str() {
        "severe" => padded.if_supports_color(Stdout, |t| t.red()).to_string(),
        "moderate" => padded.if_supports_color(Stdout, |t| t.yellow()).to_string(),
        "minimal" => padded.if_supports_color(Stdout, |t| t.green()).to_string(),
        _ => padded.if_supports_color(Stdout, |t| t.dimmed()).to_string(),
    }
}

fn heading(text: &str) -> String {
    text.if_supports_color(Stdout, |t| t.bold()).to_string()
}
