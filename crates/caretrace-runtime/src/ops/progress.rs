use caretrace_engine::{events_for_session, project_session, WorkflowProjection};
use caretrace_types::{SessionEvent, SessionRef};
use std::sync::Arc;
use tracing::debug;

use crate::api::ApiClient;
use crate::Result;

/// Workflow progress of a single session.
pub struct ProgressOps {
    client: Arc<ApiClient>,
}

impl ProgressOps {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Fetch the session's events from the events API.
    pub async fn fetch(&self, session: &SessionRef) -> Result<Vec<SessionEvent>> {
        let events = self
            .client
            .session_events(session.user_id, Some(session.session_id))
            .await?;
        Ok(events_for_session(events, session))
    }

    pub async fn load(&self, session: &SessionRef) -> Result<WorkflowProjection> {
        let events = self.fetch(session).await?;
        debug!(
            user_id = session.user_id,
            session_id = session.session_id,
            count = events.len(),
            "projecting session"
        );
        Ok(project_session(&events))
    }
}
