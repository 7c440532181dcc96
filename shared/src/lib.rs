//! Shared types for the booking desk
//!
//! Wire models for the booking backend, auth DTOs, the error-kind
//! taxonomy and timestamp helpers. Used by both `booking-client` and
//! `booking-desk`.

pub mod client;
pub mod error;
pub mod models;
pub mod time;

// Re-exports
pub use error::ErrorKind;
pub use serde::{Deserialize, Serialize};
