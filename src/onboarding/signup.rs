//! Signup: role selection, registration, then email verification.
//!
//! ```text
//! RoleSelection --select_role--> Register --submit_registration--> VerifyEmail
//!       ^                           |                                   |
//!       +---- back_to_role_selection / start_over ----------------------+
//!                                                                       |
//!                                        submit_code ok --> redirect to /login
//! ```
//!
//! Verification logs the account in, but signup still ends on the login page so
//! the user signs in explicitly. Profile completion is not part of this flow:
//! once logged in without a profile, the route guard sends the user to
//! `/onboarding`.

use tracing::debug;

use super::{
    inline_error, is_blank, looks_like_email, FlowError, Transition, MIN_PASSWORD_LENGTH,
};
use crate::auth::RegisterRequest;
use crate::guard::paths;
use crate::scope::ViewScope;
use crate::session::Role;
use crate::EmployMe;

/// Where the signup flow stands.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SignupStep {
    /// Choosing between job seeker and employer.
    #[default]
    RoleSelection,
    /// Filling in the registration form for the chosen role.
    Register {
        /// The chosen role.
        role: Role,
    },
    /// Waiting for the code emailed to `email`.
    VerifyEmail {
        /// The chosen role.
        role: Role,
        /// The address the account was registered with, as submitted.
        email: String,
    },
}

impl SignupStep {
    const fn name(&self) -> &'static str {
        match self {
            Self::RoleSelection => "role selection",
            Self::Register { .. } => "register",
            Self::VerifyEmail { .. } => "verify email",
        }
    }
}

/// Fields of the registration form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
    /// Password, typed again.
    pub confirm_password: String,
}

impl RegistrationForm {
    /// Checks the form before anything is sent; returns the message to show.
    pub fn validate(&self) -> Result<(), String> {
        if is_blank(&self.first_name) || is_blank(&self.last_name) {
            return Err("Please enter your first and last name.".to_string());
        }
        if !looks_like_email(&self.email) {
            return Err("Please enter a valid email address.".to_string());
        }
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters."
            ));
        }
        if self.password != self.confirm_password {
            return Err("Passwords do not match.".to_string());
        }
        Ok(())
    }

    fn to_request(&self, role: Role) -> RegisterRequest {
        RegisterRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            role,
        }
    }
}

/// The signup state machine.
///
/// # Example
/// ```rust,ignore
/// let mut signup = SignupFlow::new();
/// signup.select_role(Role::Employer)?;
///
/// *signup.form_mut() = RegistrationForm { /* ... */ };
/// signup.submit_registration(&mut client).await?;
///
/// if let SignupStep::VerifyEmail { email, .. } = signup.step() {
///     println!("We sent a code to {email}");
/// }
/// ```
#[derive(Debug, Default)]
pub struct SignupFlow {
    step: SignupStep,
    form: RegistrationForm,
    error: Option<String>,
    notice: Option<String>,
    scope: ViewScope,
}

impl SignupFlow {
    /// Starts a fresh signup at role selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current step.
    #[must_use]
    pub const fn step(&self) -> &SignupStep {
        &self.step
    }

    /// The registration form being filled in.
    #[must_use]
    pub const fn form(&self) -> &RegistrationForm {
        &self.form
    }

    /// Mutable access to the registration form, for input bindings.
    pub fn form_mut(&mut self) -> &mut RegistrationForm {
        &mut self.form
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

    /// The email awaiting verification, on the verify step.
    #[must_use]
    pub fn pending_email(&self) -> Option<&str> {
        match &self.step {
            SignupStep::VerifyEmail { email, .. } => Some(email),
            _ => None,
        }
    }

    /// The scope of this flow's calls. Cancel it when the view goes away.
    #[must_use]
    pub const fn scope(&self) -> &ViewScope {
        &self.scope
    }

    /// Picks the account role and moves on to the registration form.
    pub fn select_role(&mut self, role: Role) -> Result<Transition, FlowError> {
        if self.step != SignupStep::RoleSelection {
            return Err(self.invalid("select_role"));
        }
        if role == Role::Admin {
            return Err(FlowError::RoleNotSelectable);
        }

        self.error = None;
        self.step = SignupStep::Register { role };

        Ok(Transition::Advanced)
    }

    /// Submits the registration form.
    ///
    /// On success moves to the verify step carrying the submitted email. On
    /// failure stays on the form with an inline error.
    pub async fn submit_registration(
        &mut self,
        client: &mut EmployMe,
    ) -> Result<Transition, FlowError> {
        let SignupStep::Register { role } = self.step else {
            return Err(self.invalid("submit_registration"));
        };

        self.error = None;
        self.notice = None;

        if let Err(message) = self.form.validate() {
            self.error = Some(message);
            return Ok(Transition::Stayed);
        }

        let request = self.form.to_request(role);
        let result = self.scope.run(client.auth().register(&request)).await;

        match result {
            Ok(envelope) => {
                debug!(role = %role, "signup moved to email verification");
                self.notice = envelope.message;
                self.step = SignupStep::VerifyEmail {
                    role,
                    email: request.email,
                };
                Ok(Transition::Advanced)
            }
            Err(error) => Ok(self.stay_with(&error)),
        }
    }

    /// Submits the verification code.
    ///
    /// On success the signup is over: draft state is discarded and the flow
    /// redirects to the login page.
    pub async fn submit_code(
        &mut self,
        client: &mut EmployMe,
        code: &str,
    ) -> Result<Transition, FlowError> {
        if !matches!(self.step, SignupStep::VerifyEmail { .. }) {
            return Err(self.invalid("submit_code"));
        }

        self.error = None;
        self.notice = None;

        let result = self.scope.run(client.auth().verify_email(code)).await;

        match result {
            Ok(_) => {
                self.reset();
                Ok(Transition::Redirect(paths::LOGIN))
            }
            Err(error) => Ok(self.stay_with(&error)),
        }
    }

    /// Sends a new code to the pending email. Never changes the step.
    pub async fn resend_code(&mut self, client: &mut EmployMe) -> Result<Transition, FlowError> {
        let SignupStep::VerifyEmail { email, .. } = &self.step else {
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

    /// Returns to role selection, discarding everything entered so far.
    pub fn back_to_role_selection(&mut self) {
        self.reset();
    }

    /// Starts over, discarding everything entered so far.
    pub fn start_over(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.step = SignupStep::RoleSelection;
        self.form = RegistrationForm::default();
        self.error = None;
        self.notice = None;
    }

    fn stay_with(&mut self, error: &crate::ApiError) -> Transition {
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
