use serde::Serialize;
use tracing::{debug, info};

use super::{AuthPayload, VerificationCode};
use crate::error::ApiError;
use crate::response::read_data;
use crate::{Auth, User};

#[derive(Serialize)]
struct VerifyEmailBody<'a> {
    code: &'a str,
}

impl Auth<'_> {
    /// Verifies an email address with the six digit code sent by email.
    ///
    /// The code is checked locally first: anything but exactly six digits fails
    /// with [`ApiError::InvalidVerificationCode`] without contacting the server.
    ///
    /// A successful verification also logs the user in: the returned user and
    /// token are stored exactly like after [`Auth::login`].
    ///
    /// # Example
    /// ```rust,ignore
    /// let user = client.auth().verify_email("123456").await?;
    /// assert!(client.session().snapshot().is_authenticated());
    /// ```
    pub async fn verify_email(&mut self, code: &str) -> Result<User, ApiError> {
        let code = VerificationCode::parse(code)?;

        let _loading = self.client.session.begin_loading();

        let url = self.client.endpoint("/auth/verify-email");
        debug!(endpoint = %url, "verifying email");

        let body = VerifyEmailBody {
            code: code.as_str(),
        };
        let request = self.client.request_post_json(&url, &body).send().await;

        let AuthPayload { user, token } = read_data::<AuthPayload>(request).await?;

        info!(user_id = %user.id, "email verified, session opened");
        self.client.store_credentials(token, user.clone());

        Ok(user)
    }
}
