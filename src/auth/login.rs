use serde::Serialize;
use tracing::{debug, info};

use super::AuthPayload;
use crate::error::ApiError;
use crate::response::{read_envelope_or_failure, Failure};
use crate::{Auth, User};

/// Error code the backend may send when the account still needs verification.
pub const EMAIL_NOT_VERIFIED_CODE: &str = "EMAIL_NOT_VERIFIED";

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

impl Auth<'_> {
    /// Logs in with email and password.
    ///
    /// On success the user is stored in the session and the returned token is
    /// attached to every subsequent request.
    ///
    /// When the account exists but has not verified its email address, this
    /// returns [`ApiError::EmailNotVerified`] so the caller can switch to the
    /// verification step instead of showing an error.
    ///
    /// # Example
    /// ```rust,ignore
    /// match client.auth().login("ada@example.com", "correct horse").await {
    ///     Ok(user) => println!("Hello {}", user.first_name),
    ///     Err(ApiError::EmailNotVerified(_)) => show_verification_step(),
    ///     Err(error) => show_inline(error.user_message()),
    /// }
    /// ```
    pub async fn login(&mut self, email: &str, password: &str) -> Result<User, ApiError> {
        let _loading = self.client.session.begin_loading();

        let url = self.client.endpoint("/auth/login");
        debug!(endpoint = %url, "logging in");

        let credentials = Credentials { email, password };
        let request = self
            .client
            .request_post_json(&url, &credentials)
            .send()
            .await;

        let envelope = read_envelope_or_failure::<AuthPayload>(request)
            .await
            .map_err(classify_login_failure)?;

        let AuthPayload { user, token } = envelope
            .data
            .ok_or_else(|| ApiError::ParseError("Response is missing `data`.".to_string()))?;

        info!(user_id = %user.id, role = %user.role, "logged in");
        self.client.store_credentials(token, user.clone());

        Ok(user)
    }
}

/// Upgrades a login failure to [`ApiError::EmailNotVerified`] when the server
/// says so, either with the dedicated code or in the message text.
fn classify_login_failure(failure: Failure) -> ApiError {
    let Failure { error, code } = failure;

    if code.as_deref() == Some(EMAIL_NOT_VERIFIED_CODE) {
        let message = error.server_message().unwrap_or_default().to_string();
        return ApiError::EmailNotVerified(message);
    }

    match error.server_message() {
        Some(message) if mentions_verification(message) => {
            ApiError::EmailNotVerified(message.to_string())
        }
        _ => error,
    }
}

fn mentions_verification(message: &str) -> bool {
    let message = message.to_lowercase();
    message.contains("verify") || message.contains("verification")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(error: ApiError, code: Option<&str>) -> Failure {
        Failure {
            error,
            code: code.map(str::to_string),
        }
    }

    #[test]
    fn message_mentioning_verification_needs_verification() {
        let error = classify_login_failure(failure(
            ApiError::Forbidden("Please verify your email".to_string()),
            None,
        ));
        assert!(matches!(error, ApiError::EmailNotVerified(ref m) if m == "Please verify your email"));

        let error = classify_login_failure(failure(
            ApiError::BadRequest("Email Verification pending".to_string()),
            None,
        ));
        assert!(matches!(error, ApiError::EmailNotVerified(_)));
    }

    #[test]
    fn error_code_needs_verification_regardless_of_text() {
        let error = classify_login_failure(failure(
            ApiError::Forbidden("Account inactive".to_string()),
            Some(EMAIL_NOT_VERIFIED_CODE),
        ));
        assert!(matches!(error, ApiError::EmailNotVerified(ref m) if m == "Account inactive"));
    }

    #[test]
    fn other_failures_pass_through() {
        let error = classify_login_failure(failure(
            ApiError::Unauthorized("Invalid credentials".to_string()),
            None,
        ));
        assert!(matches!(error, ApiError::Unauthorized(_)));

        let error = classify_login_failure(failure(
            ApiError::Unreachable("Failed to connect to server".to_string()),
            None,
        ));
        assert!(matches!(error, ApiError::Unreachable(_)));
    }
}
