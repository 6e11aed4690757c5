use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::session::{Role, User};

pub mod check_session;
pub mod login;
pub mod logout;
pub mod password;
pub mod refresh_user;
pub mod register;
pub mod resend_verification;
pub mod verify_email;

/// What the API returns when it opens a session: the user and a bearer token.
///
/// Returned by login and by email verification, which doubles as a login.
#[derive(Clone, Debug, Deserialize)]
pub struct AuthPayload {
    /// The authenticated user.
    pub user: User,
    /// Bearer token for subsequent requests.
    pub token: String,
}

/// Payload of `GET /auth/me`.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct CurrentUser {
    pub user: User,
}

/// Body of `POST /auth/register`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Email address of the new account.
    pub email: String,
    /// Password of the new account.
    pub password: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Role of the new account; cannot be changed later.
    pub role: Role,
}

#[derive(Serialize)]
struct EmailBody<'a> {
    email: &'a str,
}

/// A six digit email verification code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationCode(String);

impl VerificationCode {
    /// Number of digits in a verification code.
    pub const LENGTH: usize = 6;

    /// Validates a code typed by the user.
    ///
    /// Surrounding whitespace is ignored; anything other than exactly six ASCII
    /// digits is rejected with [`ApiError::InvalidVerificationCode`].
    pub fn parse(code: &str) -> Result<Self, ApiError> {
        let code = code.trim();
        if code.len() == Self::LENGTH && code.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(code.to_string()))
        } else {
            Err(ApiError::InvalidVerificationCode)
        }
    }

    /// The code as typed, without surrounding whitespace.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
