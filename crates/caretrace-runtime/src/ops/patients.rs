use caretrace_engine::{build_roster, prepare_annotation, Phq9Lookup, Roster, RosterSources};
use caretrace_types::{DoctorComment, NewDoctorComment};
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::Result;

/// Roster plus the non-fatal fetch failures met while building it.
#[derive(Debug, Clone)]
pub struct RosterReport {
    pub roster: Roster,
    pub warnings: Vec<String>,
}

/// Patient roster and doctor annotations.
pub struct PatientOps {
    client: Arc<ApiClient>,
}

impl PatientOps {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Fetch and merge every source of the roster.
    ///
    /// Preferences are required; level index and comment failures degrade to
    /// empty lists, and a failed PHQ-9 lookup marks that patient `Pending`.
    pub async fn roster(&self) -> Result<RosterReport> {
        let (preferences, levels, comments) = futures::join!(
            self.client.all_preferences(),
            self.client.latest_levels(),
            self.client.doctor_comments(),
        );
        let preferences = preferences?;

        let mut warnings = Vec::new();
        let levels = levels.unwrap_or_else(|err| {
            warn!(error = %err, "level index unavailable");
            warnings.push(format!("Level index unavailable: {}", err));
            Vec::new()
        });
        let comments = comments.unwrap_or_else(|err| {
            warn!(error = %err, "doctor comments unavailable");
            warnings.push(format!("Doctor comments unavailable: {}", err));
            Vec::new()
        });

        let lookups = join_all(levels.iter().map(|entry| {
            let client = Arc::clone(&self.client);
            let user_id = entry.user_id;
            async move { (user_id, client.phq9_last_session(user_id).await) }
        }))
        .await;

        let phq9: HashMap<i64, Phq9Lookup> = lookups
            .into_iter()
            .map(|(user_id, result)| match result {
                Ok(last) => (user_id, Phq9Lookup::Found(last)),
                Err(err) => {
                    warn!(user_id, error = %err, "PHQ-9 lookup failed; level stays pending");
                    (user_id, Phq9Lookup::Failed)
                }
            })
            .collect();

        debug!(
            patients = preferences.len(),
            levels = levels.len(),
            comments = comments.len(),
            "merging roster"
        );

        let roster = build_roster(RosterSources {
            preferences,
            levels,
            phq9,
            comments,
        });
        Ok(RosterReport { roster, warnings })
    }

    pub async fn comments(&self) -> Result<Vec<DoctorComment>> {
        self.client.doctor_comments().await
    }

    /// Validate against a freshly fetched roster, then post the annotation.
    pub async fn annotate(&self, user_id: i64, level: &str, comment: &str) -> Result<NewDoctorComment> {
        let report = self.roster().await?;
        let body = prepare_annotation(&report.roster, user_id, level, comment)?;
        self.client.post_doctor_comment(&body).await?;
        Ok(body)
    }
}
