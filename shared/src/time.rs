//! Timestamp helpers
//!
//! The backend speaks naive local date-times. Outbound values always use
//! [`WIRE_FORMAT`]; inbound values are accepted with fractional seconds,
//! minute precision (the `datetime-local` form) or an RFC 3339 offset.

use chrono::{DateTime, Local, NaiveDateTime};

/// Format used for request bodies and query strings
pub const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const ACCEPTED_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a timestamp in any accepted form
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    for format in ACCEPTED_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed);
        }
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Local).naive_local())
}

/// Render a timestamp for the wire
pub fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format(WIRE_FORMAT).to_string()
}

/// Current local wall-clock time
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// `#[serde(with = "shared::time::naive")]`
pub mod naive {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timestamp(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp: {raw}")))
    }
}

/// `#[serde(with = "shared::time::naive_opt")]`
pub mod naive_opt {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_str(&super::format_timestamp(v)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => super::parse_timestamp(&raw)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid timestamp: {raw}"))),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_parse_accepted_forms() {
        assert_eq!(parse_timestamp("2024-01-01T12:00:00"), Some(at(12, 0, 0)));
        assert_eq!(parse_timestamp("2024-01-01T12:00"), Some(at(12, 0, 0)));
        assert_eq!(parse_timestamp("2024-01-01T12:00:30.250"), Some(at(12, 0, 30) + chrono::Duration::milliseconds(250)));
        assert_eq!(parse_timestamp("2024-01-01 08:15"), Some(at(8, 15, 0)));
        assert!(parse_timestamp("2024-01-01T12:00:00+00:00").is_some());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("tomorrow"), None);
        assert_eq!(parse_timestamp("2024-13-01T00:00"), None);
    }

    #[test]
    fn test_format_is_second_precision() {
        assert_eq!(format_timestamp(&at(9, 5, 0)), "2024-01-01T09:05:00");
    }
}
