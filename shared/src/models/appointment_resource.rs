//! Appointment Resource Model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Join record linking a movable resource to an appointment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentResource {
    pub id: i64,
    pub appointment_id: i64,
    pub resource_id: i64,
    #[serde(default, with = "crate::time::naive_opt")]
    pub created_at: Option<NaiveDateTime>,
}

/// Create/update join payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentResourceCreate {
    pub appointment_id: i64,
    pub resource_id: i64,
}
