use serde_json::Value;
use tracing::{debug, info};

use super::{EMPLOYER_PROFILE_PATH, JOB_SEEKER_PROFILE_PATH};
use crate::error::ApiError;
use crate::onboarding::profile::{EmployerDraft, JobSeekerDraft};
use crate::response::read_data;
use crate::Profiles;

impl Profiles<'_> {
    /// Creates the job seeker profile of the logged in user.
    ///
    /// Returns the profile record as stored by the server. The session's
    /// `has_profile` flag is not touched; call
    /// [`Auth::refresh_user`](crate::Auth::refresh_user) to pick it up.
    ///
    /// # Example
    /// ```rust,ignore
    /// let profile = client.profiles().create_job_seeker(&draft).await?;
    /// client.auth().refresh_user().await;
    /// ```
    pub async fn create_job_seeker(&self, draft: &JobSeekerDraft) -> Result<Value, ApiError> {
        self.create(JOB_SEEKER_PROFILE_PATH, draft).await
    }

    /// Creates the employer profile of the logged in user.
    ///
    /// Returns the profile record as stored by the server. The session's
    /// `has_profile` flag is not touched.
    pub async fn create_employer(&self, draft: &EmployerDraft) -> Result<Value, ApiError> {
        self.create(EMPLOYER_PROFILE_PATH, draft).await
    }

    async fn create<T: serde::Serialize>(&self, path: &str, draft: &T) -> Result<Value, ApiError> {
        let url = self.client.endpoint(path);
        debug!(endpoint = %url, "creating profile");

        let request = self.client.request_post_json(&url, draft).send().await;
        let profile = read_data::<Value>(request).await?;

        info!(endpoint = %url, "profile created");
        Ok(profile)
    }
}
