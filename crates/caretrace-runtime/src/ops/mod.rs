mod monitor;
mod patients;
mod progress;

pub use monitor::MonitorOps;
pub use patients::{PatientOps, RosterReport};
pub use progress::ProgressOps;

use caretrace_types::{parse_events_document, SessionEvent};
use std::path::Path;

/// Read a saved events API response (`{ "events": [...] }` or a bare array).
pub fn read_events_file(path: &Path) -> crate::Result<Vec<SessionEvent>> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_events_document(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use caretrace_testing::fixtures;
    use tempfile::TempDir;

    #[test]
    fn test_read_events_file() -> crate::Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("events.json");
        fixtures::write_events_file(&path, &fixtures::complete_session())
            .map_err(|e| crate::Error::InvalidOperation(e.to_string()))?;

        let events = read_events_file(&path)?;
        assert_eq!(events, fixtures::complete_session());
        Ok(())
    }

    #[test]
    fn test_read_events_file_errors() -> crate::Result<()> {
        let temp_dir = TempDir::new()?;
        assert!(matches!(
            read_events_file(&temp_dir.path().join("missing.json")),
            Err(crate::Error::Io(_))
        ));

        let path = temp_dir.path().join("garbage.json");
        std::fs::write(&path, "not json")?;
        assert!(matches!(read_events_file(&path), Err(crate::Error::Json(_))));
        Ok(())
    }
}
