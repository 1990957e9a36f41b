use caretrace_types::{
    DoctorComment, DoctorCommentsResponse, LevelIndexEntry, LevelIndexResponse,
    NewDoctorComment, PatientPreference, Phq9LastSession, PreferencesResponse,
};
use tracing::debug;

use super::ApiClient;
use crate::Result;

impl ApiClient {
    /// `GET /api/blissme/all-preferences`
    pub async fn all_preferences(&self) -> Result<Vec<PatientPreference>> {
        let request = self.authorized(self.http.get(self.api_url("/api/blissme/all-preferences")));
        let response: PreferencesResponse = self.fetch_json(request).await?;
        debug!(count = response.preferences.users.len(), "fetched preferences");
        Ok(response.preferences.users)
    }

    /// `GET /levelDetection/all-users-latest-index`
    pub async fn latest_levels(&self) -> Result<Vec<LevelIndexEntry>> {
        let request = self.authorized(
            self.http
                .get(self.api_url("/levelDetection/all-users-latest-index")),
        );
        let response: LevelIndexResponse = self.fetch_json(request).await?;
        debug!(count = response.data.len(), "fetched level index");
        Ok(response.data)
    }

    /// `GET /phq9/last-session/{userID}`
    pub async fn phq9_last_session(&self, user_id: i64) -> Result<Phq9LastSession> {
        let request = self.authorized(
            self.http
                .get(self.api_url(&format!("/phq9/last-session/{}", user_id))),
        );
        self.fetch_json(request).await
    }

    /// `GET /doctorlevel/comments`
    pub async fn doctor_comments(&self) -> Result<Vec<DoctorComment>> {
        let request = self.authorized(self.http.get(self.api_url("/doctorlevel/comments")));
        let response: DoctorCommentsResponse = self.fetch_json(request).await?;
        debug!(count = response.data.len(), "fetched doctor comments");
        Ok(response.data)
    }

    /// `POST /doctorlevel/comments`
    pub async fn post_doctor_comment(&self, comment: &NewDoctorComment) -> Result<()> {
        let request = self.authorized(
            self.http
                .post(self.api_url("/doctorlevel/comments"))
                .json(comment),
        );
        self.send(request).await?;
        debug!(user_id = comment.user_id, "posted doctor comment");
        Ok(())
    }
}
