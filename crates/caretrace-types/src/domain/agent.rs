use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Pipeline agents, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Agent {
    Assessment,
    Classifier,
    Therapy,
}

impl Agent {
    /// All agents in pipeline order.
    pub const ALL: [Agent; 3] = [Agent::Assessment, Agent::Classifier, Agent::Therapy];

    pub fn key(&self) -> &'static str {
        match self {
            Agent::Assessment => "assessment",
            Agent::Classifier => "classifier",
            Agent::Therapy => "therapy",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Agent::Assessment => "Assessment Agent",
            Agent::Classifier => "Classifier Agent",
            Agent::Therapy => "Therapy Agent",
        }
    }

    /// Map a producer `agent_name` to an agent.
    ///
    /// The pipeline's conversational agent reports itself as `chat`; it drives
    /// the assessment stage.
    pub fn from_agent_name(name: &str) -> Option<Agent> {
        match name.trim().to_ascii_lowercase().as_str() {
            "chat" => Some(Agent::Assessment),
            "classifier" => Some(Agent::Classifier),
            "therapy" => Some(Agent::Therapy),
            _ => None,
        }
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Agent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "assessment" => Ok(Agent::Assessment),
            "classifier" => Ok(Agent::Classifier),
            "therapy" => Ok(Agent::Therapy),
            _ => Err(Error::invalid("agent", s)),
        }
    }
}

/// Grouping bucket for an event; `Unknown` is never rendered by any agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentBucket {
    Agent(Agent),
    Unknown,
}

impl AgentBucket {
    pub fn from_agent_name(name: Option<&str>) -> Self {
        name.and_then(Agent::from_agent_name)
            .map(AgentBucket::Agent)
            .unwrap_or(AgentBucket::Unknown)
    }

    pub fn agent(&self) -> Option<Agent> {
        match self {
            AgentBucket::Agent(agent) => Some(*agent),
            AgentBucket::Unknown => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            AgentBucket::Agent(agent) => agent.key(),
            AgentBucket::Unknown => "unknown",
        }
    }
}

impl Serialize for AgentBucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_name_mapping() {
        assert_eq!(Agent::from_agent_name("Chat"), Some(Agent::Assessment));
        assert_eq!(Agent::from_agent_name("CLASSIFIER"), Some(Agent::Classifier));
        assert_eq!(Agent::from_agent_name("therapy"), Some(Agent::Therapy));
        assert_eq!(Agent::from_agent_name("assessment"), None);
        assert_eq!(Agent::from_agent_name("monitor"), None);
    }

    #[test]
    fn test_bucket_defaults_to_unknown() {
        assert_eq!(AgentBucket::from_agent_name(None), AgentBucket::Unknown);
        assert_eq!(AgentBucket::from_agent_name(Some("")), AgentBucket::Unknown);
        assert_eq!(
            AgentBucket::from_agent_name(Some("chat")).agent(),
            Some(Agent::Assessment)
        );
    }

    #[test]
    fn test_agent_from_str() {
        assert_eq!("Therapy".parse::<Agent>().unwrap(), Agent::Therapy);
        assert!("chat".parse::<Agent>().is_err());
    }
}
