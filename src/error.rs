//! Various errors module.

use thiserror::Error;

pub use crate::config::ConfigError;
pub use crate::onboarding::FlowError;

/// Message shown when neither the server nor the transport gave anything better.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

/// Structured classification of an [`ApiError`].
///
/// UI code branches on this rather than on error text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The API could not be reached, or the call timed out.
    Transport,
    /// The server rejected the input (bad credentials, malformed fields, conflicts).
    Validation,
    /// The account exists but its email address has not been verified yet.
    EmailNotVerified,
    /// The request requires a valid session.
    Unauthorized,
    /// The session is valid but not allowed to do this.
    Forbidden,
    /// The requested resource does not exist.
    NotFound,
    /// The server is rate limiting requests.
    RateLimited,
    /// The server failed while processing the request.
    Server,
    /// The call was cancelled before it settled.
    Cancelled,
    /// The response did not match what the client expects.
    Unexpected,
}

/// Represents errors when interacting with the Employ.me API.
///
/// Variants carrying a server message display it verbatim, so `to_string()`
/// can be shown to the user as-is.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The API answered with a [400 Bad Request]("https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/400")
    /// or [422 Unprocessable Content]("https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/422"),
    /// or with a `success: false` envelope.
    #[error("{0}")]
    BadRequest(String),
    /// The API answered with a [401 Unauthorized]("https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/401").
    ///
    /// Wrong credentials on login, or no valid session on protected endpoints.
    #[error("{0}")]
    Unauthorized(String),
    /// The login was refused because the email address is not verified.
    ///
    /// Only produced by [`Auth::login`](crate::Auth::login).
    #[error("{0}")]
    EmailNotVerified(String),
    /// The API answered with a [403 Forbidden]("https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/403").
    #[error("{0}")]
    Forbidden(String),
    /// The API answered with a [404 Not Found]("https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/404").
    #[error("{0}")]
    NotFound(String),
    /// The API answered with a [409 Conflict]("https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/409"),
    /// e.g. an email address that is already registered.
    #[error("{0}")]
    Conflict(String),
    /// The API answered with a [429 Too Many Requests]("https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/429").
    #[error("{0}")]
    TooManyRequests(String),
    /// The API answered with a 5xx status.
    #[error("{message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Message from the server, or the generic message.
        message: String,
    },
    /// A verification code was rejected before sending: it must be exactly six digits.
    #[error("Verification code must be exactly 6 digits.")]
    InvalidVerificationCode,
    /// Communication with the API failed.
    ///
    /// This could be caused by an internet outage, a wrong base URL, or a timeout.
    #[error("{0}")]
    Unreachable(String),
    /// The response could not be parsed into the expected data structure.
    #[error("Parse Error: Could not parse response into the expected data structure. {0}")]
    ParseError(String),
    /// The call was cancelled because the view that started it went away.
    #[error("The request was cancelled.")]
    Cancelled,
    /// An unexpected status code was returned by the API.
    #[error("Unhandled Error: unexpected status {0}.")]
    Unhandled(u16),
}

impl ApiError {
    /// Returns the structured kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::BadRequest(_) | Self::Conflict(_) | Self::InvalidVerificationCode => {
                ErrorKind::Validation
            }
            Self::Unauthorized(_) => ErrorKind::Unauthorized,
            Self::EmailNotVerified(_) => ErrorKind::EmailNotVerified,
            Self::Forbidden(_) => ErrorKind::Forbidden,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::TooManyRequests(_) => ErrorKind::RateLimited,
            Self::Server { .. } => ErrorKind::Server,
            Self::Unreachable(_) => ErrorKind::Transport,
            Self::Cancelled => ErrorKind::Cancelled,
            Self::ParseError(_) | Self::Unhandled(_) => ErrorKind::Unexpected,
        }
    }

    /// Returns the message a form should display inline for this error.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::ParseError(_) | Self::Unhandled(_) => GENERIC_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }

    /// Returns the server-supplied message, if this error carries one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::BadRequest(message)
            | Self::Unauthorized(message)
            | Self::EmailNotVerified(message)
            | Self::Forbidden(message)
            | Self::NotFound(message)
            | Self::Conflict(message)
            | Self::TooManyRequests(message)
            | Self::Server { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Maps a non-success HTTP status and its message to an error.
    pub(crate) fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        match status {
            reqwest::StatusCode::BAD_REQUEST | reqwest::StatusCode::UNPROCESSABLE_ENTITY => {
                Self::BadRequest(message)
            }
            reqwest::StatusCode::UNAUTHORIZED => Self::Unauthorized(message),
            reqwest::StatusCode::FORBIDDEN => Self::Forbidden(message),
            reqwest::StatusCode::NOT_FOUND => Self::NotFound(message),
            reqwest::StatusCode::CONFLICT => Self::Conflict(message),
            reqwest::StatusCode::TOO_MANY_REQUESTS => Self::TooManyRequests(message),
            status if status.is_server_error() => Self::Server {
                status: status.as_u16(),
                message,
            },
            status => Self::Unhandled(status.as_u16()),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Unreachable("Request timed out".to_string())
        } else if error.is_connect() {
            Self::Unreachable("Failed to connect to server".to_string())
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::Unreachable(GENERIC_ERROR_MESSAGE.to_string())
        }
    }
}
