use serde::de::DeserializeOwned;
use tracing::debug;

use super::OWN_PROFILE_PATH;
use crate::error::ApiError;
use crate::response::read_data;
use crate::Profiles;

impl Profiles<'_> {
    /// Fetches the profile of the logged in user.
    ///
    /// The record is role-specific; deserialize it into a matching type, or into
    /// `serde_json::Value` to keep it opaque. Fails with
    /// [`ApiError::NotFound`] when no profile exists yet.
    ///
    /// # Example
    /// ```rust,ignore
    /// let profile: serde_json::Value = client.profiles().get_own().await?;
    /// ```
    pub async fn get_own<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        let url = self.client.endpoint(OWN_PROFILE_PATH);
        debug!(endpoint = %url, "fetching own profile");

        let request = self.client.request_get(&url).send().await;
        read_data::<T>(request).await
    }
}
