//! Booking Desk
//!
//! Terminal front end for the booking backend:
//! - [`desk`]: client + session, navigation through route guards
//! - [`routes`]: route table and guards
//! - [`views`]: one view model per screen
//! - [`booking`]: time buckets, permissions, availability
//! - [`commands`]: CLI handlers

pub mod booking;
pub mod cli;
pub mod commands;
pub mod config;
pub mod desk;
pub mod error;
pub mod logger;
pub mod routes;
pub mod views;

pub use config::DeskConfig;
pub use desk::{Desk, Opened};
pub use error::{DeskError, DeskResult};
