//! Booking Client - HTTP client for the booking backend
//!
//! Typed REST calls over a swappable [`HttpClient`], plus the session
//! store that turns credentials into a persisted token and user.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod session;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, NetworkHttpClient};
pub use reqwest::StatusCode;
pub use session::{Session, SessionError, SessionStorage, SessionStore};

// Re-export shared types for convenience
pub use shared::client::{LoginRequest, TokenResponse};
