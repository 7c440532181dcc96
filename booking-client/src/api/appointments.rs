//! `/appointments` endpoints

use shared::models::{Appointment, AppointmentCreate, AppointmentFilter, AppointmentUpdate};
use shared::time::format_timestamp;

use super::with_query;
use crate::{ClientResult, HttpClient};

/// All appointments, or only one user's when `user_id` is given
pub async fn list<C: HttpClient>(client: &C, user_id: Option<i64>) -> ClientResult<Vec<Appointment>> {
    let pairs: Vec<(&str, String)> = user_id
        .map(|id| vec![("user_id", id.to_string())])
        .unwrap_or_default();
    client.get(&with_query("appointments", &pairs)).await
}

pub async fn get<C: HttpClient>(client: &C, appointment_id: i64) -> ClientResult<Appointment> {
    client.get(&format!("appointments/{appointment_id}")).await
}

pub async fn filter<C: HttpClient>(
    client: &C,
    filter: &AppointmentFilter,
) -> ClientResult<Vec<Appointment>> {
    let mut pairs = Vec::new();
    if let Some(room_id) = filter.room_id {
        pairs.push(("room_id", room_id.to_string()));
    }
    if let Some(start) = &filter.start_time {
        pairs.push(("start_time", format_timestamp(start)));
    }
    if let Some(end) = &filter.end_time {
        pairs.push(("end_time", format_timestamp(end)));
    }
    client.get(&with_query("appointments/filter", &pairs)).await
}

pub async fn create<C: HttpClient>(
    client: &C,
    appointment: &AppointmentCreate,
) -> ClientResult<Appointment> {
    client.post("appointments", appointment).await
}

pub async fn update<C: HttpClient>(
    client: &C,
    appointment_id: i64,
    appointment: &AppointmentUpdate,
) -> ClientResult<Appointment> {
    client
        .put(&format!("appointments/{appointment_id}"), appointment)
        .await
}

pub async fn delete<C: HttpClient>(client: &C, appointment_id: i64) -> ClientResult<Appointment> {
    client.delete(&format!("appointments/{appointment_id}")).await
}
