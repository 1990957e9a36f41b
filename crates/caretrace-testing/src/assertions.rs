//! Custom assertions over the CLI's JSON output.
//!
//! Every command prints `{ "badge"?, "content", "suggestions"? }`; these
//! helpers reach into `content` so tests read as statements about the domain.

use anyhow::{Context, Result};
use serde_json::Value;

fn agent<'a>(json: &'a Value, agent_key: &str) -> Result<&'a Value> {
    json["content"]["agents"]
        .as_array()
        .context("Expected 'content.agents' array in JSON")?
        .iter()
        .find(|agent| agent["agent"] == agent_key)
        .with_context(|| format!("Agent '{}' missing from output", agent_key))
}

/// Assert the top-level stages of an agent, as `(title, status)` pairs in order.
pub fn assert_stage_statuses(json: &Value, agent_key: &str, expected: &[(&str, &str)]) -> Result<()> {
    let stages = agent(json, agent_key)?["stages"]
        .as_array()
        .with_context(|| format!("Agent '{}' has no 'stages' array", agent_key))?;

    let actual: Vec<(String, String)> = stages
        .iter()
        .map(|stage| {
            (
                stage["title"].as_str().unwrap_or_default().to_string(),
                stage["status"].as_str().unwrap_or_default().to_string(),
            )
        })
        .collect();

    let expected: Vec<(String, String)> = expected
        .iter()
        .map(|(title, status)| (title.to_string(), status.to_string()))
        .collect();

    if actual != expected {
        anyhow::bail!(
            "Stage mismatch for agent '{}':\n  expected {:?}\n  actual   {:?}",
            agent_key,
            expected,
            actual
        );
    }

    Ok(())
}

/// Assert which agent the progress view focuses on (`None` = no active agent).
pub fn assert_focus(json: &Value, expected: Option<&str>) -> Result<()> {
    let focus = json["content"]["focus"].as_str();
    if focus != expected {
        anyhow::bail!("Expected focus {:?}, got {:?}", expected, focus);
    }
    Ok(())
}

/// Assert the number of rows returned by `monitor` and that the summary agrees.
pub fn assert_monitor_rows(json: &Value, expected: usize) -> Result<()> {
    let rows = json["content"]["events"]
        .as_array()
        .context("Expected 'content.events' array in JSON")?;

    if rows.len() != expected {
        anyhow::bail!("Expected {} monitor rows, got {}", expected, rows.len());
    }

    let total = json["content"]["summary"]["total"]
        .as_u64()
        .context("Expected 'content.summary.total' in JSON")?;
    if total as usize != expected {
        anyhow::bail!("Summary total {} disagrees with {} rows", total, expected);
    }

    Ok(())
}

/// Assert the level of the status badge (`success`, `info`, `warning`, `error`).
pub fn assert_badge_level(json: &Value, expected: &str) -> Result<()> {
    let level = json["badge"]["level"]
        .as_str()
        .context("Expected 'badge.level' in JSON")?;

    if level != expected {
        anyhow::bail!("Expected badge level '{}', got '{}'", expected, level);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stage_status_assertion() {
        let output = json!({
            "content": {
                "agents": [{
                    "agent": "classifier",
                    "stages": [
                        { "title": "Session Ended", "status": "wait" },
                        { "title": "Level Detection", "status": "finish" }
                    ]
                }]
            }
        });

        assert_stage_statuses(
            &output,
            "classifier",
            &[("Session Ended", "wait"), ("Level Detection", "finish")],
        )
        .unwrap();
        assert!(assert_stage_statuses(&output, "classifier", &[("Session Ended", "finish")]).is_err());
        assert!(assert_stage_statuses(&output, "therapy", &[]).is_err());
    }
}
