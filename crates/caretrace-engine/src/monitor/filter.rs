use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::Value;
use std::cmp::Ordering;

use caretrace_types::{parse_timestamp, Error, NormalizedEvent, Result, RiskLevel};

/// Which end of a date range a bound is parsed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBound {
    Since,
    Until,
}

impl DateBound {
    /// Parse a range bound given as RFC 3339, a naive timestamp or a bare
    /// `YYYY-MM-DD` date. A bare `until` date covers the whole day.
    pub fn parse(self, raw: &str) -> Result<DateTime<Utc>> {
        if let Some(dt) = parse_timestamp(raw) {
            return Ok(dt);
        }

        let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map_err(|_| Error::invalid("date", raw))?;
        let naive = match self {
            DateBound::Since => date.and_hms_opt(0, 0, 0),
            DateBound::Until => date.and_hms_nano_opt(23, 59, 59, 999_999_999),
        }
        .ok_or_else(|| Error::invalid("date", raw))?;

        Ok(Utc.from_utc_datetime(&naive))
    }
}

/// Filter over normalized events.
///
/// Every criterion is optional; an empty filter matches everything.
///
/// # Example
/// ```
/// use caretrace_engine::EventFilter;
/// use caretrace_types::RiskLevel;
///
/// let filter = EventFilter::new().agent("assessment").risk(RiskLevel::High);
/// assert!(!filter.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventFilter {
    pub agent: Option<String>,
    pub risk: Option<RiskLevel>,
    pub search: Option<String>,
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

impl EventFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Match the raw agent name or the mapped agent key, case-insensitively.
    pub fn agent(mut self, agent: impl Into<String>) -> Self {
        self.agent = Some(agent.into());
        self
    }

    pub fn risk(mut self, risk: RiskLevel) -> Self {
        self.risk = Some(risk);
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    pub fn until(mut self, until: DateTime<Utc>) -> Self {
        self.until = Some(until);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, event: &NormalizedEvent) -> bool {
        self.matches_agent(event)
            && self.matches_risk(event)
            && self.matches_search(event)
            && self.matches_range(event)
    }

    fn matches_agent(&self, event: &NormalizedEvent) -> bool {
        let Some(needle) = non_empty_lowercase(self.agent.as_deref()) else {
            return true;
        };
        event
            .agent_name
            .as_deref()
            .is_some_and(|name| name.trim().to_lowercase() == needle)
            || event.bucket.key() == needle
    }

    fn matches_risk(&self, event: &NormalizedEvent) -> bool {
        self.risk.is_none_or(|risk| event.risk == risk)
    }

    fn matches_search(&self, event: &NormalizedEvent) -> bool {
        let Some(needle) = non_empty_lowercase(self.search.as_deref()) else {
            return true;
        };
        [&event.input_data, &event.output_data, &event.summary]
            .into_iter()
            .flatten()
            .any(|value| searchable_text(value).to_lowercase().contains(&needle))
    }

    fn matches_range(&self, event: &NormalizedEvent) -> bool {
        if self.since.is_none() && self.until.is_none() {
            return true;
        }
        let Some(timestamp) = event.timestamp else {
            return false;
        };
        self.since.is_none_or(|since| timestamp >= since)
            && self.until.is_none_or(|until| timestamp <= until)
    }
}

fn non_empty_lowercase(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_lowercase)
}

/// Strings are searched as-is; structured payloads by their JSON text.
fn searchable_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Apply a filter and order the surviving events newest first.
///
/// Events without a usable timestamp go last, in feed order.
pub fn filter_events(events: &[NormalizedEvent], filter: &EventFilter) -> Vec<NormalizedEvent> {
    let mut rows: Vec<NormalizedEvent> = events
        .iter()
        .filter(|event| filter.matches(event))
        .cloned()
        .collect();
    rows.sort_by(newest_first);
    rows
}

fn newest_first(a: &NormalizedEvent, b: &NormalizedEvent) -> Ordering {
    match (a.timestamp, b.timestamp) {
        (Some(x), Some(y)) => y.cmp(&x).then(a.sequence.cmp(&b.sequence)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.sequence.cmp(&b.sequence),
    }
}
