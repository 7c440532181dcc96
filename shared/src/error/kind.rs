//! Error kind classification

use http::StatusCode;
use serde::{Deserialize, Serialize};

/// Error kind classification
///
/// Kinds are derived from where a request failed:
/// - transport never reached the backend: `Network`
/// - 400 / 422: `Validation`
/// - 401 / 403: `Authorization`
/// - 404: `NotFound`
/// - body or token could not be decoded: `Decode`
/// - any other non-success status: `Server`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Connection refused, DNS, timeout
    Network,
    /// Backend rejected the payload
    Validation,
    /// Missing or insufficient credentials
    Authorization,
    /// Entity does not exist
    NotFound,
    /// Response or token body was malformed
    Decode,
    /// Backend failed
    Server,
}

impl ErrorKind {
    /// Determine kind from an HTTP status
    ///
    /// Success statuses have no kind.
    pub fn from_status(status: StatusCode) -> Option<Self> {
        if status.is_success() {
            return None;
        }
        Some(match status {
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => Self::Validation,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Authorization,
            StatusCode::NOT_FOUND => Self::NotFound,
            _ => Self::Server,
        })
    }

    /// Get the string name for this kind
    pub fn name(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Validation => "validation",
            Self::Authorization => "authorization",
            Self::NotFound => "not_found",
            Self::Decode => "decode",
            Self::Server => "server",
        }
    }

    /// Short hint shown next to a failed action
    pub fn hint(&self) -> &'static str {
        match self {
            Self::Network => "The booking server could not be reached.",
            Self::Validation => "The server rejected the submitted data.",
            Self::Authorization => "You are not allowed to do that. Try logging in again.",
            Self::NotFound => "The requested item no longer exists.",
            Self::Decode => "The server sent a response that could not be read.",
            Self::Server => "The booking server reported an error.",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
