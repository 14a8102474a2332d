//! Error taxonomy for explanation requests.
//!
//! Every failure a submission can hit is one of four kinds. None of them
//! escape the request lifecycle: they are folded into the `Error` phase
//! through [`ExplainError::user_message`].
//!
//! | Variant | Cause |
//! |---------|-------|
//! | `Validation` | Neither text nor image provided |
//! | `Transport` | Service unreachable, connection reset |
//! | `RequestFailed` | Non-2xx HTTP status |
//! | `Decode` | Success status with an unusable body |

use thiserror::Error;

/// Prefix shared by every error message shown to the user.
pub const USER_MESSAGE_PREFIX: &str = "An error occurred: ";

/// Reason given when a submission has neither text nor an image.
pub const MISSING_INPUT_REASON: &str = "Please provide either text or an image";

/// Result alias for explanation operations.
pub type ExplainResult<T> = Result<T, ExplainError>;

/// Errors produced while building or exchanging an explanation request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExplainError {
    /// The input cannot be submitted
    #[error("{0}")]
    Validation(String),

    /// The request never produced an HTTP response
    #[error("Failed to fetch: {0}")]
    Transport(String),

    /// The service answered with a non-success status
    #[error("API request failed")]
    RequestFailed { status: u16 },

    /// The success body was missing or malformed
    #[error("Invalid response from explanation service: {0}")]
    Decode(String),
}

impl ExplainError {
    /// Validation error for an empty submission.
    pub fn missing_input() -> Self {
        ExplainError::Validation(MISSING_INPUT_REASON.to_string())
    }

    /// Message displayed in the `Error` phase.
    ///
    /// Always carries [`USER_MESSAGE_PREFIX`] so a failure can never be
    /// mistaken for an explanation that happens to be empty.
    pub fn user_message(&self) -> String {
        format!("{}{}", USER_MESSAGE_PREFIX, self)
    }

    /// Short code for log lines.
    pub fn error_code(&self) -> &'static str {
        match self {
            ExplainError::Validation(_) => "E_VALIDATION",
            ExplainError::Transport(_) => "E_TRANSPORT",
            ExplainError::RequestFailed { .. } => "E_REQUEST_FAILED",
            ExplainError::Decode(_) => "E_DECODE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_user_message() {
        assert_eq!(
            ExplainError::missing_input().user_message(),
            "An error occurred: Please provide either text or an image"
        );
    }

    #[test]
    fn test_request_failed_hides_status_from_user() {
        let err = ExplainError::RequestFailed { status: 500 };
        assert_eq!(err.user_message(), "An error occurred: API request failed");
    }

    #[test]
    fn test_transport_and_decode_display() {
        assert_eq!(
            ExplainError::Transport("connection refused".to_string()).to_string(),
            "Failed to fetch: connection refused"
        );
        assert_eq!(
            ExplainError::Decode("missing field `explanation`".to_string()).to_string(),
            "Invalid response from explanation service: missing field `explanation`"
        );
    }

    #[test]
    fn test_every_user_message_is_prefixed() {
        let errors = [
            ExplainError::missing_input(),
            ExplainError::Transport("x".to_string()),
            ExplainError::RequestFailed { status: 404 },
            ExplainError::Decode("y".to_string()),
        ];
        for err in errors {
            assert!(err.user_message().starts_with(USER_MESSAGE_PREFIX));
        }
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(ExplainError::missing_input().error_code(), "E_VALIDATION");
        assert_eq!(
            ExplainError::Transport(String::new()).error_code(),
            "E_TRANSPORT"
        );
        assert_eq!(
            ExplainError::RequestFailed { status: 502 }.error_code(),
            "E_REQUEST_FAILED"
        );
        assert_eq!(ExplainError::Decode(String::new()).error_code(), "E_DECODE");
    }
}
