//! `/rooms` endpoints

use chrono::NaiveDateTime;
use shared::models::{Room, RoomCreate, RoomUpdate};

use super::{window, with_query};
use crate::{ClientResult, HttpClient};

pub async fn list<C: HttpClient>(client: &C) -> ClientResult<Vec<Room>> {
    client.get("rooms").await
}

pub async fn get<C: HttpClient>(client: &C, room_id: i64) -> ClientResult<Room> {
    client.get(&format!("rooms/{room_id}")).await
}

pub async fn create<C: HttpClient>(client: &C, room: &RoomCreate) -> ClientResult<Room> {
    client.post("rooms", room).await
}

pub async fn update<C: HttpClient>(client: &C, room_id: i64, room: &RoomUpdate) -> ClientResult<Room> {
    client.put(&format!("rooms/{room_id}"), room).await
}

/// The backend answers with a status object, not the room
pub async fn delete<C: HttpClient>(client: &C, room_id: i64) -> ClientResult<()> {
    let _: serde_json::Value = client.delete(&format!("rooms/{room_id}")).await?;
    Ok(())
}

/// Rooms free for the whole window
pub async fn available<C: HttpClient>(
    client: &C,
    start: &NaiveDateTime,
    end: &NaiveDateTime,
) -> ClientResult<Vec<Room>> {
    client.get(&with_query("rooms/available", &window(start, end))).await
}
