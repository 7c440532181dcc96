//! Candidate rooms and movable resources for a booking window
//!
//! Rooms and resources are fetched concurrently and independently; a
//! failure on one side leaves the other usable. Each refresh carries a
//! [`Ticket`] from a [`RequestGeneration`] so a slow response for an old
//! window cannot replace the result for a newer one.

use std::sync::atomic::{AtomicU64, Ordering};

use booking_client::{ClientResult, HttpClient, api};
use shared::models::{Resource, Room};

use super::TimeWindow;
use crate::views::Notice;

pub const NO_ROOMS: &str = "No rooms available for the selected time.";
pub const NO_RESOURCES: &str = "No resources available for the selected time.";

/// Identifies one availability request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Monotonic request counter; only the newest ticket is current
#[derive(Debug, Default)]
pub struct RequestGeneration(AtomicU64);

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding every earlier ticket
    pub fn next(&self) -> Ticket {
        Ticket(self.0.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.0.load(Ordering::Acquire) == ticket.0
    }
}

/// What the booking form may offer for a window
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Candidates {
    pub rooms: Vec<Room>,
    pub resources: Vec<Resource>,
    pub room_error: Option<String>,
    pub resource_error: Option<String>,
    pub failure: Option<Notice>,
}

/// Put `selected` at the front unless a room with its id is already listed
pub fn include_selected(mut rooms: Vec<Room>, selected: Room) -> Vec<Room> {
    if !rooms.iter().any(|r| r.id == selected.id) {
        rooms.insert(0, selected);
    }
    rooms
}

async fn candidate_rooms<C: HttpClient>(
    client: &C,
    window: &TimeWindow,
    selected_room: Option<i64>,
) -> ClientResult<Vec<Room>> {
    let rooms = api::rooms::available(client, &window.start(), &window.end()).await?;
    match selected_room {
        Some(id) if !rooms.iter().any(|r| r.id == id) => {
            let selected = api::rooms::get(client, id).await?;
            Ok(include_selected(rooms, selected))
        }
        _ => Ok(rooms),
    }
}

/// Fetch candidates for `window`
///
/// `selected_room` stays selectable even when the backend no longer
/// reports it free, which is the case for the room an edited appointment
/// already occupies.
pub async fn fetch_candidates<C: HttpClient>(
    client: &C,
    window: &TimeWindow,
    selected_room: Option<i64>,
) -> Candidates {
    let (start, end) = (window.start(), window.end());
    let (rooms, resources) = tokio::join!(
        candidate_rooms(client, window, selected_room),
        api::resources::movable_available(client, &start, &end),
    );

    let mut candidates = Candidates::default();
    match rooms {
        Ok(rooms) => {
            if rooms.is_empty() {
                candidates.room_error = Some(NO_ROOMS.to_string());
            }
            candidates.rooms = rooms;
        }
        Err(e) => candidates.failure = Some(Notice::failed("Failed to fetch rooms", &e)),
    }
    match resources {
        Ok(resources) => {
            if resources.is_empty() {
                candidates.resource_error = Some(NO_RESOURCES.to_string());
            }
            candidates.resources = resources;
        }
        Err(e) => {
            candidates.failure = Some(Notice::failed("Failed to fetch available movable resources", &e))
        }
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(id: i64, name: &str) -> Room {
        Room {
            id,
            name: name.into(),
            capacity: 4,
            fixed_resources: Vec::new(),
            created_at: None,
        }
    }

    #[test]
    fn test_selected_room_goes_first_once() {
        let rooms = include_selected(vec![room(2, "B"), room(3, "C")], room(1, "A"));
        let ids: Vec<i64> = rooms.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let again = include_selected(rooms, room(1, "A"));
        assert_eq!(again.len(), 3);
    }

    #[test]
    fn test_listed_room_is_not_duplicated() {
        let rooms = include_selected(vec![room(2, "B"), room(1, "A")], room(1, "A"));
        let ids: Vec<i64> = rooms.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_only_latest_ticket_is_current() {
        let generation = RequestGeneration::new();
        let first = generation.next();
        assert!(generation.is_current(first));

        let second = generation.next();
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
        assert!(second > first);
    }
}
