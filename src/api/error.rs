//! API Error Types
//!
//! Failures of a single request/response exchange with the backend.
//! Every variant is terminal for the user action that caused it; nothing
//! is retried.

use thiserror::Error;

/// Errors returned by a [`Backend`](super::Backend)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, CORS...)
    #[error("Network error: {0}")]
    Transport(String),

    /// The backend answered with a non-success status
    #[error("Backend returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body did not have the expected shape
    #[error("Parse error: {0}")]
    Decode(String),
}

/// Result type alias for backend calls
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(feature = "native")]
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::Status {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::Status {
            status: 500,
            message: "calendar bridge down".to_string(),
        };
        assert_eq!(err.to_string(), "Backend returned 500: calendar bridge down");

        let err = ApiError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let api_err: ApiError = json_err.into();
        assert!(matches!(api_err, ApiError::Decode(_)));
    }
}
