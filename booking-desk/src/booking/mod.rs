//! Booking rules shared by the views
//!
//! - [`time_bucket`]: upcoming / in progress / past classification
//! - [`permissions`]: who may edit or cancel
//! - [`window`]: start/end validation
//! - [`availability`]: candidate rooms and resources for a window
//! - [`details`]: appointment rows enriched with names

pub mod availability;
pub mod details;
pub mod permissions;
pub mod time_bucket;
pub mod window;

pub use availability::{Candidates, RequestGeneration, Ticket, fetch_candidates};
pub use details::{AppointmentDetails, enrich};
pub use permissions::{can_modify, can_modify_appointment};
pub use time_bucket::TimeBucket;
pub use window::{TimeWindow, WindowError};
