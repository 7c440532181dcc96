//! Error taxonomy shared by the client and the desk
//!
//! - [`ErrorKind`]: what kind of failure happened, independent of where
//!
//! Transport, HTTP status and decoding failures all collapse into one of
//! a handful of kinds so the desk can pick a message per kind instead
//! of a single generic string.

mod kind;

pub use kind::ErrorKind;
