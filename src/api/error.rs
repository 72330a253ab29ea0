//! Failure taxonomy for calls against the Dreaming API

use reqwest::StatusCode;
use thiserror::Error;

/// What went wrong talking to the service.
///
/// `Auth` and `Network` are fatal for the run. `Api` is fatal when it happens
/// during the fetch stage; during submission it is logged and the entry is
/// skipped.
#[derive(Debug, Error)]
pub enum ApiFailure {
    /// The bearer token was rejected (HTTP 401/403).
    #[error("authentication rejected (HTTP {status}): {body}")]
    Auth { status: StatusCode, body: String },

    /// Transport-level failure before a usable response was obtained.
    #[error("network failure talking to the Dreaming API: {0}")]
    Network(#[from] reqwest::Error),

    /// Any other non-success response.
    #[error("Dreaming API returned HTTP {status}: {body}")]
    Api { status: StatusCode, body: String },
}

impl ApiFailure {
    /// Classify a non-success response by status code.
    pub fn from_response(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Auth { status, body },
            _ => Self::Api { status, body },
        }
    }

    /// True for failures that must abort the whole run even mid-submission.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Api { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_and_forbidden_classify_as_auth() {
        for status in [StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN] {
            let failure = ApiFailure::from_response(status, "token expired".into());
            assert!(matches!(failure, ApiFailure::Auth { .. }));
            assert!(failure.is_fatal());
        }
    }

    #[test]
    fn test_other_statuses_classify_as_api() {
        for status in [
            StatusCode::BAD_REQUEST,
            StatusCode::NOT_FOUND,
            StatusCode::INTERNAL_SERVER_ERROR,
        ] {
            let failure = ApiFailure::from_response(status, "boom".into());
            assert!(matches!(failure, ApiFailure::Api { .. }));
            assert!(!failure.is_fatal());
        }
    }

    #[test]
    fn test_failure_messages_carry_status_and_body() {
        let failure = ApiFailure::from_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "database unavailable".into(),
        );
        let message = failure.to_string();
        assert!(message.contains("500"));
        assert!(message.contains("database unavailable"));
    }
}
