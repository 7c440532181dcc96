//! Data models
//!
//! Wire shapes of the booking backend. Entities are passed through as
//! received; payload types (`*Create`, `*Update`) are what the client
//! sends. All IDs are `i64`.

pub mod appointment;
pub mod appointment_resource;
pub mod resource;
pub mod room;
pub mod user;

// Re-exports
pub use appointment::*;
pub use appointment_resource::*;
pub use resource::*;
pub use room::*;
pub use user::*;
