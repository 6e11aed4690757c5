use serde_json::Value;
use tracing::{debug, info};

use super::RegisterRequest;
use crate::error::ApiError;
use crate::response::{read_envelope, ApiEnvelope};
use crate::Auth;

impl Auth<'_> {
    /// Creates an account.
    ///
    /// Registration does not open a session: the account must verify its email
    /// address first (see [`Auth::verify_email`]). The raw server answer is
    /// returned for the caller to inspect.
    ///
    /// # Example
    /// ```rust,ignore
    /// let answer = client
    ///     .auth()
    ///     .register(&RegisterRequest {
    ///         email: "ada@example.com".to_string(),
    ///         password: "correct horse".to_string(),
    ///         first_name: "Ada".to_string(),
    ///         last_name: "Lovelace".to_string(),
    ///         role: Role::JobSeeker,
    ///     })
    ///     .await?;
    ///
    /// println!("{}", answer.message.unwrap_or_default());
    /// ```
    pub async fn register(
        &mut self,
        request: &RegisterRequest,
    ) -> Result<ApiEnvelope<Value>, ApiError> {
        let _loading = self.client.session.begin_loading();

        let url = self.client.endpoint("/auth/register");
        debug!(endpoint = %url, role = %request.role, "registering");

        let response = self.client.request_post_json(&url, request).send().await;
        let envelope = read_envelope::<Value>(response).await?;

        info!(role = %request.role, "registered, awaiting email verification");

        Ok(envelope)
    }
}
