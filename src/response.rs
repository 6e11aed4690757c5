//! Decoding of the API's `{ success, data?, message?, code? }` envelope.

use serde::{de::DeserializeOwned, Deserialize};
use tracing::debug;

use crate::error::{ApiError, GENERIC_ERROR_MESSAGE};

/// The envelope every Employ.me endpoint answers with.
#[derive(Clone, Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Whether the server considers the call successful.
    #[serde(default = "default_success")]
    pub success: bool,
    /// Payload, when the endpoint returns one.
    pub data: Option<T>,
    /// Human readable message, shown to the user as-is.
    #[serde(default)]
    pub message: Option<String>,
    /// Machine readable error code, when the backend provides one.
    #[serde(default)]
    pub code: Option<String>,
}

const fn default_success() -> bool {
    true
}

impl<T> ApiEnvelope<T> {
    const fn empty() -> Self {
        Self {
            success: true,
            data: None,
            message: None,
            code: None,
        }
    }
}

/// Body of a non-2xx answer. Everything is optional so that any JSON (or none) parses.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

impl ErrorBody {
    pub(crate) fn message_or_generic(&self) -> String {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|message| !message.is_empty())
            .unwrap_or(GENERIC_ERROR_MESSAGE)
            .to_string()
    }
}

/// A failed call, with whatever the server said about it.
pub(crate) struct Failure {
    pub error: ApiError,
    pub code: Option<String>,
}

/// Turns a sent request into its envelope, keeping the raw error code on failure.
pub(crate) async fn read_envelope_or_failure<T: DeserializeOwned>(
    request: Result<reqwest::Response, reqwest::Error>,
) -> Result<ApiEnvelope<T>, Failure> {
    let response = request.map_err(|error| Failure {
        error: ApiError::from(error),
        code: None,
    })?;

    let status = response.status();

    if status == reqwest::StatusCode::NO_CONTENT {
        return Ok(ApiEnvelope::empty());
    }

    if status.is_success() {
        let body = response.bytes().await.map_err(|error| Failure {
            error: ApiError::from(error),
            code: None,
        })?;
        let envelope = decode_success_body::<T>(&body).map_err(|error| Failure {
            error,
            code: None,
        })?;

        if !envelope.success {
            let body = ErrorBody {
                message: envelope.message,
                code: envelope.code,
            };
            return Err(Failure {
                error: ApiError::BadRequest(body.message_or_generic()),
                code: body.code,
            });
        }

        return Ok(envelope);
    }

    let body = response.json::<ErrorBody>().await.unwrap_or_default();
    debug!(status = %status, code = ?body.code, "API call failed");

    Err(Failure {
        error: ApiError::from_status(status, body.message_or_generic()),
        code: body.code,
    })
}

/// Decodes the body of a 2xx answer. An empty body reads as an empty envelope.
fn decode_success_body<T: DeserializeOwned>(body: &[u8]) -> Result<ApiEnvelope<T>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ApiEnvelope::empty());
    }

    serde_json::from_slice(body).map_err(|error| ApiError::ParseError(error.to_string()))
}

/// Turns a sent request into its envelope.
pub(crate) async fn read_envelope<T: DeserializeOwned>(
    request: Result<reqwest::Response, reqwest::Error>,
) -> Result<ApiEnvelope<T>, ApiError> {
    read_envelope_or_failure(request)
        .await
        .map_err(|failure| failure.error)
}

/// Turns a sent request into the `data` of its envelope, which must be present.
pub(crate) async fn read_data<T: DeserializeOwned>(
    request: Result<reqwest::Response, reqwest::Error>,
) -> Result<T, ApiError> {
    read_envelope::<T>(request)
        .await?
        .data
        .ok_or_else(|| ApiError::ParseError("Response is missing `data`.".to_string()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn envelope_fields_are_optional() {
        let envelope: ApiEnvelope<serde_json::Value> =
            serde_json::from_value(json!({ "message": "Code sent" })).unwrap();
        assert!(envelope.success);
        assert!(envelope.data.is_none());
        assert_eq!(envelope.message.as_deref(), Some("Code sent"));
    }

    #[test]
    fn blank_error_message_falls_back_to_generic() {
        let body = ErrorBody {
            message: Some("   ".to_string()),
            code: None,
        };
        assert_eq!(body.message_or_generic(), GENERIC_ERROR_MESSAGE);
        assert_eq!(ErrorBody::default().message_or_generic(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn empty_success_body_is_an_empty_envelope() {
        for body in [&b""[..], &b"  \n"[..]] {
            let envelope = decode_success_body::<serde_json::Value>(body).unwrap();
            assert!(envelope.success);
            assert!(envelope.data.is_none());
            assert!(envelope.message.is_none());
        }
    }

    #[test]
    fn garbled_success_body_is_a_parse_error() {
        let result = decode_success_body::<serde_json::Value>(b"<html>");
        assert!(matches!(result, Err(ApiError::ParseError(_))));
    }
}
