//! REST API functions, one module per backend resource
//!
//! Each function is a thin request/response mapping over [`HttpClient`];
//! nothing here interprets the data.
//!
//! [`HttpClient`]: crate::HttpClient

pub mod appointment_resources;
pub mod appointments;
pub mod resources;
pub mod rooms;
pub mod users;

use chrono::NaiveDateTime;
use urlencoding::encode;

/// Build `path?k=v&...`, percent-encoding values; no `?` when empty
pub(crate) fn with_query(path: &str, pairs: &[(&str, String)]) -> String {
    if pairs.is_empty() {
        return path.to_string();
    }
    let query = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{path}?{query}")
}

/// `start_time`/`end_time` pair in wire format
pub(crate) fn window(start: &NaiveDateTime, end: &NaiveDateTime) -> [(&'static str, String); 2] {
    [
        ("start_time", shared::time::format_timestamp(start)),
        ("end_time", shared::time::format_timestamp(end)),
    ]
}
