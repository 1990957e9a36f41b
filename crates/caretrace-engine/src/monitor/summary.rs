use serde::Serialize;
use std::collections::BTreeMap;

use caretrace_types::{NormalizedEvent, RiskLevel};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RiskCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl RiskCounts {
    fn record(&mut self, risk: RiskLevel) {
        match risk {
            RiskLevel::Low => self.low += 1,
            RiskLevel::Medium => self.medium += 1,
            RiskLevel::High => self.high += 1,
        }
    }

    pub fn get(&self, risk: RiskLevel) -> usize {
        match risk {
            RiskLevel::Low => self.low,
            RiskLevel::Medium => self.medium,
            RiskLevel::High => self.high,
        }
    }
}

/// Aggregate counts over a (usually filtered) event list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MonitorSummary {
    pub total: usize,
    pub anomalies: usize,
    pub risk: RiskCounts,
    /// Event count per agent key (`unknown` for unmapped names)
    pub by_agent: BTreeMap<String, usize>,
}

pub fn summarize(events: &[NormalizedEvent]) -> MonitorSummary {
    let mut summary = MonitorSummary {
        total: events.len(),
        ..MonitorSummary::default()
    };

    for event in events {
        if event.anomaly {
            summary.anomalies += 1;
        }
        summary.risk.record(event.risk);
        *summary
            .by_agent
            .entry(event.bucket.key().to_string())
            .or_default() += 1;
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_events;
    use caretrace_testing::EventBuilder;
    use serde_json::json;

    #[test]
    fn test_summary_counts() {
        let events = normalize_events(&[
            EventBuilder::chat("2025-03-01T10:00:00").risk("high").anomaly().build(),
            EventBuilder::chat("2025-03-01T10:01:00").build(),
            EventBuilder::classifier("2025-03-01T10:02:00")
                .output_field("risk", json!("Medium"))
                .output_field("is_anomaly", json!(true))
                .build(),
            EventBuilder::new("scheduler", "2025-03-01T10:03:00")
                .risk("critical")
                .build(),
        ]);

        insta::assert_json_snapshot!(summarize(&events), @r#"
        {
          "total": 4,
          "anomalies": 2,
          "risk": {
            "low": 2,
            "medium": 1,
            "high": 1
          },
          "by_agent": {
            "assessment": 2,
            "classifier": 1,
            "unknown": 1
          }
        }
        "#);
    }

    #[test]
    fn test_empty_summary() {
        let summary = summarize(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.risk.get(RiskLevel::Low), 0);
        assert!(summary.by_agent.is_empty());
    }
}
