//! Session store
//!
//! - [`SessionStorage`]: durable JSON file holding `{token, user}`
//! - [`SessionStore`]: in-memory session, restored from storage at
//!   startup and mutated only by `login`/`logout`
//! - [`token`]: reads the subject claim out of an access token

mod storage;
mod store;
pub mod token;

pub use storage::SessionStorage;
pub use store::{Session, SessionError, SessionStore};
