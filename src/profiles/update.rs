use serde_json::Value;
use tracing::debug;

use super::{EMPLOYER_PROFILE_PATH, JOB_SEEKER_PROFILE_PATH};
use crate::error::ApiError;
use crate::onboarding::profile::{EmployerDraft, JobSeekerDraft};
use crate::response::read_data;
use crate::Profiles;

impl Profiles<'_> {
    /// Replaces the job seeker profile of the logged in user.
    pub async fn update_job_seeker(&self, draft: &JobSeekerDraft) -> Result<Value, ApiError> {
        let url = self.client.endpoint(JOB_SEEKER_PROFILE_PATH);
        debug!(endpoint = %url, "updating profile");

        let request = self.client.request_put_json(&url, draft).send().await;
        read_data::<Value>(request).await
    }

    /// Replaces the employer profile of the logged in user.
    pub async fn update_employer(&self, draft: &EmployerDraft) -> Result<Value, ApiError> {
        let url = self.client.endpoint(EMPLOYER_PROFILE_PATH);
        debug!(endpoint = %url, "updating profile");

        let request = self.client.request_put_json(&url, draft).send().await;
        read_data::<Value>(request).await
    }
}
