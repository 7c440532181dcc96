//! `/resources` endpoints

use chrono::NaiveDateTime;
use shared::models::{Resource, ResourceCreate, ResourceUpdate};

use super::{window, with_query};
use crate::{ClientResult, HttpClient};

pub async fn list<C: HttpClient>(client: &C) -> ClientResult<Vec<Resource>> {
    client.get("resources").await
}

pub async fn get<C: HttpClient>(client: &C, resource_id: i64) -> ClientResult<Resource> {
    client.get(&format!("resources/{resource_id}")).await
}

/// Resources whose availability flag is `available`
pub async fn available<C: HttpClient>(client: &C) -> ClientResult<Vec<Resource>> {
    client.get("resources/available").await
}

/// Movable resources not booked anywhere in the window
pub async fn movable_available<C: HttpClient>(
    client: &C,
    start: &NaiveDateTime,
    end: &NaiveDateTime,
) -> ClientResult<Vec<Resource>> {
    client
        .get(&with_query("resources/movable/available", &window(start, end)))
        .await
}

pub async fn create<C: HttpClient>(client: &C, resource: &ResourceCreate) -> ClientResult<Resource> {
    client.post("resources", resource).await
}

pub async fn update<C: HttpClient>(
    client: &C,
    resource_id: i64,
    resource: &ResourceUpdate,
) -> ClientResult<Resource> {
    client.put(&format!("resources/{resource_id}"), resource).await
}

pub async fn delete<C: HttpClient>(client: &C, resource_id: i64) -> ClientResult<Resource> {
    client.delete(&format!("resources/{resource_id}")).await
}
