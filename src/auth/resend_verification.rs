use serde_json::Value;
use tracing::debug;

use super::EmailBody;
use crate::error::ApiError;
use crate::response::read_envelope;
use crate::Auth;

impl Auth<'_> {
    /// Sends a new verification code to `email`.
    ///
    /// Does not touch the session. Returns the server message, if any.
    ///
    /// # Example
    /// ```rust,ignore
    /// client
    ///     .auth()
    ///     .resend_verification_code("ada@example.com")
    ///     .await?;
    /// ```
    pub async fn resend_verification_code(
        &self,
        email: &str,
    ) -> Result<Option<String>, ApiError> {
        let url = self.client.endpoint("/auth/resend-verification");
        debug!(endpoint = %url, "requesting a new verification code");

        let request = self
            .client
            .request_post_json(&url, &EmailBody { email })
            .send()
            .await;

        Ok(read_envelope::<Value>(request).await?.message)
    }
}
