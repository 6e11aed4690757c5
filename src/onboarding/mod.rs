//! Form state machines for signup, login and profile completion.
//!
//! Each flow keeps its current step plus an inline error and notice for the view
//! to display. Failed calls never end a flow; the user can retry as often as
//! they like. Every flow owns a [`ViewScope`](crate::ViewScope): dropping the
//! flow, or cancelling its scope, abandons any call still in flight.

use thiserror::Error;

use crate::error::ApiError;

pub mod login;
pub mod profile;
pub mod signup;

/// Minimum password length accepted by the registration form.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Outcome of a flow transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// The flow moved to its next step.
    Advanced,
    /// The flow stayed on its step; see its inline error or notice.
    Stayed,
    /// The flow is done; navigate to this path.
    Redirect(&'static str),
    /// The view went away before the call settled; nothing changed.
    Cancelled,
}

/// A transition was requested that the current step does not offer.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FlowError {
    /// The transition is not available on the current step.
    #[error("`{action}` is not available on the {step} step")]
    InvalidStep {
        /// What was attempted.
        action: &'static str,
        /// The step the flow is on.
        step: &'static str,
    },
    /// Admin accounts cannot be created through signup.
    #[error("Only job seeker and employer accounts can sign up")]
    RoleNotSelectable,
    /// The logged in user has no role-specific profile form.
    #[error("There is no profile form for this account")]
    NoProfileForm,
}

/// Inline error text for a failed call, or `None` when the call was cancelled.
pub(crate) fn inline_error(error: &ApiError) -> Option<String> {
    match error {
        ApiError::Cancelled => None,
        other => Some(other.user_message()),
    }
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub(crate) fn looks_like_email(value: &str) -> bool {
    let value = value.trim();
    value
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty())
}
