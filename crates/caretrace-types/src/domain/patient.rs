use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Explicit session selection, passed by the caller instead of ambient state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRef {
    pub user_id: i64,
    pub session_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
}

impl SessionRef {
    pub fn new(user_id: i64, session_id: i64) -> Self {
        Self {
            user_id,
            session_id,
            nickname: None,
        }
    }

    pub fn with_nickname(mut self, nickname: Option<String>) -> Self {
        self.nickname = nickname;
        self
    }
}

/// Depression severity as reported by level detection or set by a doctor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DepressionLevel {
    Minimal,
    Moderate,
    Severe,
    /// PHQ-9 not yet fully answered; the detected level is not trusted
    Pending,
    Other(String),
}

impl DepressionLevel {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "minimal" => Self::Minimal,
            "moderate" => Self::Moderate,
            "severe" => Self::Severe,
            "pending" => Self::Pending,
            _ => Self::Other(label.trim().to_string()),
        }
    }

    /// Parse a level a doctor may assign.
    pub fn assignable(label: &str) -> Option<Self> {
        match Self::from_label(label) {
            level @ (Self::Minimal | Self::Moderate | Self::Severe) => Some(level),
            _ => None,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Minimal => "Minimal",
            Self::Moderate => "Moderate",
            Self::Severe => "Severe",
            Self::Pending => "Pending",
            Self::Other(label) => label,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl fmt::Display for DepressionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for DepressionLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for DepressionLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::from_label(&label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_labels_are_case_insensitive() {
        assert_eq!(DepressionLevel::from_label("SEVERE"), DepressionLevel::Severe);
        assert_eq!(DepressionLevel::from_label("pending"), DepressionLevel::Pending);
        assert_eq!(
            DepressionLevel::from_label("Mild"),
            DepressionLevel::Other("Mild".to_string())
        );
    }

    #[test]
    fn test_assignable_levels() {
        assert_eq!(
            DepressionLevel::assignable("moderate"),
            Some(DepressionLevel::Moderate)
        );
        assert_eq!(DepressionLevel::assignable("Pending"), None);
        assert_eq!(DepressionLevel::assignable("mild"), None);
    }

    #[test]
    fn test_level_serializes_as_label() {
        let json = serde_json::to_string(&DepressionLevel::Minimal).unwrap();
        assert_eq!(json, "\"Minimal\"");
        let level: DepressionLevel = serde_json::from_str("\"severe\"").unwrap();
        assert_eq!(level, DepressionLevel::Severe);
    }
}
