//! Login form, with a detour through email verification for unverified accounts.

use tracing::debug;

use super::{inline_error, is_blank, FlowError, Transition};
use crate::error::ApiError;
use crate::guard::dashboard_for;
use crate::scope::ViewScope;
use crate::EmployMe;

/// Where the login flow stands.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoginStep {
    /// Email and password.
    #[default]
    Credentials,
    /// The account must verify `email` before it can log in.
    VerifyEmail {
        /// The email used in the login attempt.
        email: String,
    },
}

impl LoginStep {
    const fn name(&self) -> &'static str {
        match self {
            Self::Credentials => "credentials",
            Self::VerifyEmail { .. } => "verify email",
        }
    }
}

/// The login state machine.
#[derive(Debug, Default)]
pub struct LoginFlow {
    step: LoginStep,
    error: Option<String>,
    notice: Option<String>,
    scope: ViewScope,
}

impl LoginFlow {
    /// Starts on the credentials step.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current step.
    #[must_use]
    pub const fn step(&self) -> &LoginStep {
        &self.step
    }

    /// Inline error to display, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Informational message to display, if any.
    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// The scope of this flow's calls. Cancel it when the view goes away.
    #[must_use]
    pub const fn scope(&self) -> &ViewScope {
        &self.scope
    }

    /// Logs in.
    ///
    /// Success redirects to the user's dashboard (the route guard takes it from
    /// there if the profile is missing). An unverified account moves to the
    /// verify step with the attempted email and no error.
    pub async fn submit_credentials(
        &mut self,
        client: &mut EmployMe,
        email: &str,
        password: &str,
    ) -> Result<Transition, FlowError> {
        if self.step != LoginStep::Credentials {
            return Err(self.invalid("submit_credentials"));
        }

        self.error = None;
        self.notice = None;

        let email = email.trim();
        if is_blank(email) || password.is_empty() {
            self.error = Some("Please enter your email and password.".to_string());
            return Ok(Transition::Stayed);
        }

        let result = self.scope.run(client.auth().login(email, password)).await;

        match result {
            Ok(user) => Ok(Transition::Redirect(dashboard_for(user.role))),
            Err(ApiError::EmailNotVerified(_)) => {
                debug!("login needs email verification");
                self.notice = Some(format!("Enter the 6-digit code sent to {email}."));
                self.step = LoginStep::VerifyEmail {
                    email: email.to_string(),
                };
                Ok(Transition::Advanced)
            }
            Err(error) => Ok(self.stay_with(&error)),
        }
    }

    /// Submits the verification code, then returns to the credentials step.
    pub async fn submit_code(
        &mut self,
        client: &mut EmployMe,
        code: &str,
    ) -> Result<Transition, FlowError> {
        if !matches!(self.step, LoginStep::VerifyEmail { .. }) {
            return Err(self.invalid("submit_code"));
        }

        self.error = None;
        self.notice = None;

        let result = self.scope.run(client.auth().verify_email(code)).await;

        match result {
            Ok(_) => {
                self.step = LoginStep::Credentials;
                self.notice = Some("Email verified. You can now log in.".to_string());
                Ok(Transition::Advanced)
            }
            Err(error) => Ok(self.stay_with(&error)),
        }
    }

    /// Sends a new code to the email being verified. Never changes the step.
    pub async fn resend_code(&mut self, client: &mut EmployMe) -> Result<Transition, FlowError> {
        let LoginStep::VerifyEmail { email } = &self.step else {
            return Err(self.invalid("resend_code"));
        };
        let email = email.clone();

        self.error = None;
        self.notice = None;

        let result = self
            .scope
            .run(client.auth().resend_verification_code(&email))
            .await;

        match result {
            Ok(message) => {
                self.notice = Some(
                    message.unwrap_or_else(|| format!("A new code has been sent to {email}.")),
                );
                Ok(Transition::Stayed)
            }
            Err(error) => Ok(self.stay_with(&error)),
        }
    }

    /// Leaves the verify step without verifying.
    pub fn back_to_login(&mut self) {
        self.step = LoginStep::Credentials;
        self.error = None;
        self.notice = None;
    }

    fn stay_with(&mut self, error: &ApiError) -> Transition {
        match inline_error(error) {
            Some(message) => {
                self.error = Some(message);
                Transition::Stayed
            }
            None => Transition::Cancelled,
        }
    }

    fn invalid(&self, action: &'static str) -> FlowError {
        FlowError::InvalidStep {
            action,
            step: self.step.name(),
        }
    }
}
