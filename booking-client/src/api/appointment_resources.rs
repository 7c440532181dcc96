//! `/appointment-resources` endpoints

use shared::models::{AppointmentResource, AppointmentResourceCreate};

use super::with_query;
use crate::{ClientResult, HttpClient};

/// Join records of one appointment
pub async fn list<C: HttpClient>(
    client: &C,
    appointment_id: i64,
) -> ClientResult<Vec<AppointmentResource>> {
    client
        .get(&with_query(
            "appointment-resources",
            &[("appointment_id", appointment_id.to_string())],
        ))
        .await
}

pub async fn get<C: HttpClient>(client: &C, link_id: i64) -> ClientResult<AppointmentResource> {
    client.get(&format!("appointment-resources/{link_id}")).await
}

pub async fn create<C: HttpClient>(
    client: &C,
    link: &AppointmentResourceCreate,
) -> ClientResult<AppointmentResource> {
    client.post("appointment-resources", link).await
}

pub async fn update<C: HttpClient>(
    client: &C,
    link_id: i64,
    link: &AppointmentResourceCreate,
) -> ClientResult<AppointmentResource> {
    client
        .put(&format!("appointment-resources/{link_id}"), link)
        .await
}

pub async fn delete<C: HttpClient>(client: &C, link_id: i64) -> ClientResult<AppointmentResource> {
    client.delete(&format!("appointment-resources/{link_id}")).await
}

/// Join records of one appointment restricted to movable resources
pub async fn movable<C: HttpClient>(
    client: &C,
    appointment_id: i64,
) -> ClientResult<Vec<AppointmentResource>> {
    client
        .get(&format!("appointment-resources/movable/{appointment_id}"))
        .await
}
