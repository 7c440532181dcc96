//! Appointment Model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Appointment entity
///
/// `resource_ids` is not part of the backend's appointment body; it is
/// filled from the appointment-resource join records when a form needs it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub user_id: i64,
    pub room_id: i64,
    #[serde(with = "crate::time::naive")]
    pub start_time: NaiveDateTime,
    #[serde(with = "crate::time::naive")]
    pub end_time: NaiveDateTime,
    #[serde(default)]
    pub resource_ids: Vec<i64>,
    #[serde(default, with = "crate::time::naive_opt")]
    pub created_at: Option<NaiveDateTime>,
}

/// Create appointment payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentCreate {
    pub user_id: i64,
    pub room_id: i64,
    #[serde(with = "crate::time::naive")]
    pub start_time: NaiveDateTime,
    #[serde(with = "crate::time::naive")]
    pub end_time: NaiveDateTime,
    #[serde(default)]
    pub resource_ids: Vec<i64>,
}

/// Update appointment payload; the window is always resent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<i64>,
    #[serde(with = "crate::time::naive")]
    pub start_time: NaiveDateTime,
    #[serde(with = "crate::time::naive")]
    pub end_time: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_ids: Option<Vec<i64>>,
}

impl From<AppointmentCreate> for AppointmentUpdate {
    fn from(create: AppointmentCreate) -> Self {
        Self {
            user_id: Some(create.user_id),
            room_id: Some(create.room_id),
            start_time: create.start_time,
            end_time: create.end_time,
            resource_ids: Some(create.resource_ids),
        }
    }
}

/// Query for `GET /appointments/filter`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppointmentFilter {
    pub room_id: Option<i64>,
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
}

impl AppointmentFilter {
    pub fn is_empty(&self) -> bool {
        self.room_id.is_none() && self.start_time.is_none() && self.end_time.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_backend_appointment() {
        let json = r#"{"id":1,"user_id":2,"room_id":3,"start_time":"2024-01-01T11:00:00","end_time":"2024-01-01T13:00","created_at":null}"#;
        let appointment: Appointment = serde_json::from_str(json).unwrap();
        assert_eq!(appointment.start_time.to_string(), "2024-01-01 11:00:00");
        assert_eq!(appointment.end_time.to_string(), "2024-01-01 13:00:00");
        assert!(appointment.resource_ids.is_empty());
        assert!(appointment.created_at.is_none());
    }

    #[test]
    fn test_invalid_timestamp_is_rejected() {
        let json = r#"{"id":1,"user_id":2,"room_id":3,"start_time":"soon","end_time":"2024-01-01T13:00"}"#;
        assert!(serde_json::from_str::<Appointment>(json).is_err());
    }

    #[test]
    fn test_create_serializes_wire_format() {
        let start = crate::time::parse_timestamp("2024-01-01T14:00").unwrap();
        let end = crate::time::parse_timestamp("2024-01-01T15:00").unwrap();
        let body = serde_json::to_value(AppointmentCreate {
            user_id: 7,
            room_id: 1,
            start_time: start,
            end_time: end,
            resource_ids: vec![4, 5],
        })
        .unwrap();
        assert_eq!(body["start_time"], "2024-01-01T14:00:00");
        assert_eq!(body["end_time"], "2024-01-01T15:00:00");
        assert_eq!(body["resource_ids"], serde_json::json!([4, 5]));
    }
}
