use caretrace_types::{parse_events_document, SessionEvent};
use tracing::debug;

use super::ApiClient;
use crate::Result;

impl ApiClient {
    /// `GET /monitor-agent/get-session-events?user_id=..[&session_id=..]`
    ///
    /// Accepts the `{ "events": [...] }` envelope or a bare array.
    pub async fn session_events(
        &self,
        user_id: i64,
        session_id: Option<i64>,
    ) -> Result<Vec<SessionEvent>> {
        let mut query = vec![("user_id", user_id.to_string())];
        if let Some(session_id) = session_id {
            query.push(("session_id", session_id.to_string()));
        }

        let request = self
            .http
            .get(self.events_url("/monitor-agent/get-session-events"))
            .query(&query);
        let body = self.send(request).await?;
        let events = parse_events_document(&body)?;

        debug!(user_id, ?session_id, count = events.len(), "fetched session events");
        Ok(events)
    }
}
