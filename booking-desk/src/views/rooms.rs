//! Room list and room detail

use booking_client::{HttpClient, api};
use shared::models::Room;

use super::{Notice, table};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomList {
    pub rooms: Vec<Room>,
    pub error: Option<Notice>,
}

impl RoomList {
    pub async fn load<C: HttpClient>(client: &C) -> Self {
        match api::rooms::list(client).await {
            Ok(rooms) => Self { rooms, error: None },
            Err(e) => Self {
                rooms: Vec::new(),
                error: Some(Notice::failed("Failed to fetch rooms", &e)),
            },
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::from("Room List\n");
        if let Some(error) = &self.error {
            out.push_str(&error.render());
            out.push('\n');
            return out;
        }
        let rows: Vec<Vec<String>> = self
            .rooms
            .iter()
            .map(|r| vec![r.name.clone(), r.capacity.to_string(), r.fixed_resource_names()])
            .collect();
        out.push_str(&table(&["Room Name", "Capacity", "Fixed Resources"], &rows));
        out
    }
}

/// Summary of one room, shown next to the booking form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomDetail {
    pub name: String,
    pub capacity: i32,
    pub fixed_resources: Vec<String>,
}

impl From<&Room> for RoomDetail {
    fn from(room: &Room) -> Self {
        Self {
            name: room.name.clone(),
            capacity: room.capacity,
            fixed_resources: room.fixed_resources.iter().map(|r| r.name.clone()).collect(),
        }
    }
}

impl RoomDetail {
    pub fn render(&self) -> String {
        let fixed = if self.fixed_resources.is_empty() {
            "None".to_string()
        } else {
            self.fixed_resources.join(", ")
        };
        format!(
            "Room: {}\nCapacity: {}\nFixed Resources: {}\n",
            self.name, self.capacity, fixed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Availability, Resource, ResourceType};

    #[test]
    fn test_room_detail_lists_fixed_resources() {
        let room = Room {
            id: 1,
            name: "Boardroom".into(),
            capacity: 12,
            fixed_resources: vec![Resource {
                id: 5,
                name: "Screen".into(),
                resource_type: ResourceType::Fixed,
                availability: Availability::Available,
                created_at: None,
            }],
            created_at: None,
        };
        let detail = RoomDetail::from(&room);
        assert_eq!(detail.render(), "Room: Boardroom\nCapacity: 12\nFixed Resources: Screen\n");
    }
}
