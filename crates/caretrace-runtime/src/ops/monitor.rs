use caretrace_engine::{monitor_events, EventFilter, MonitorReport};
use std::sync::Arc;

use crate::api::ApiClient;
use crate::Result;

/// Event monitoring across one user's sessions.
pub struct MonitorOps {
    client: Arc<ApiClient>,
}

impl MonitorOps {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn load(
        &self,
        user_id: i64,
        session_id: Option<i64>,
        filter: &EventFilter,
    ) -> Result<MonitorReport> {
        let events = self.client.session_events(user_id, session_id).await?;
        Ok(monitor_events(&events, filter))
    }
}
