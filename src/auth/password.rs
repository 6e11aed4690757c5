use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::EmailBody;
use crate::error::ApiError;
use crate::response::read_envelope;
use crate::Auth;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResetPasswordBody<'a> {
    code: &'a str,
    new_password: &'a str,
}

impl Auth<'_> {
    /// Asks the server to email a password reset code.
    ///
    /// Does not touch the session. Returns the server message, if any.
    pub async fn forgot_password(&self, email: &str) -> Result<Option<String>, ApiError> {
        let url = self.client.endpoint("/auth/forgot-password");
        debug!(endpoint = %url, "requesting password reset");

        let request = self
            .client
            .request_post_json(&url, &EmailBody { email })
            .send()
            .await;

        Ok(read_envelope::<Value>(request).await?.message)
    }

    /// Sets a new password using the code from the reset email.
    ///
    /// Does not touch the session; the user logs in afterwards.
    ///
    /// # Example
    /// ```rust,ignore
    /// client.auth().reset_password("482913", "a much better password").await?;
    /// ```
    pub async fn reset_password(
        &self,
        code: &str,
        new_password: &str,
    ) -> Result<Option<String>, ApiError> {
        let url = self.client.endpoint("/auth/reset-password");
        debug!(endpoint = %url, "resetting password");

        let body = ResetPasswordBody { code, new_password };
        let request = self.client.request_post_json(&url, &body).send().await;

        Ok(read_envelope::<Value>(request).await?.message)
    }
}
