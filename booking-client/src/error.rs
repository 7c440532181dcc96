//! Client error types

use reqwest::StatusCode;
use shared::ErrorKind;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response arrived
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("{status}: {message}")]
    Status { status: StatusCode, message: String },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Access token could not be decoded
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Operation requires a logged-in session
    #[error("Authentication required")]
    Unauthorized,

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Build a status error, pulling FastAPI's `detail` out of the body when present
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("detail").map(detail_text))
            .unwrap_or_else(|| body.trim().to_string());
        Self::Status { status, message }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Http(e) if e.is_decode() => ErrorKind::Decode,
            Self::Http(e) => match e.status().and_then(ErrorKind::from_status) {
                Some(kind) => kind,
                None => ErrorKind::Network,
            },
            Self::Status { status, .. } => {
                ErrorKind::from_status(*status).unwrap_or(ErrorKind::Server)
            }
            Self::InvalidResponse(_) | Self::InvalidToken(_) | Self::Serialization(_) => {
                ErrorKind::Decode
            }
            Self::Unauthorized => ErrorKind::Authorization,
        }
    }

    /// HTTP status, when the backend produced one
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status(),
            _ => None,
        }
    }
}

fn detail_text(detail: &serde_json::Value) -> String {
    match detail {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_uses_detail() {
        let err = ClientError::from_status(
            StatusCode::UNAUTHORIZED,
            r#"{"detail":"Invalid username or password"}"#,
        );
        assert_eq!(err.kind(), ErrorKind::Authorization);
        assert_eq!(err.to_string(), "401 Unauthorized: Invalid username or password");
    }

    #[test]
    fn test_status_error_falls_back_to_body() {
        let err = ClientError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "boom\n");
        assert_eq!(err.kind(), ErrorKind::Server);
        assert!(matches!(err, ClientError::Status { ref message, .. } if message == "boom"));
    }

    #[test]
    fn test_kinds() {
        assert_eq!(
            ClientError::from_status(StatusCode::NOT_FOUND, "").kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            ClientError::from_status(StatusCode::UNPROCESSABLE_ENTITY, "[]").kind(),
            ErrorKind::Validation
        );
        assert_eq!(ClientError::Unauthorized.kind(), ErrorKind::Authorization);
        assert_eq!(ClientError::InvalidToken("x".into()).kind(), ErrorKind::Decode);
    }
}
