//! Admin: create, edit and delete rooms

use booking_client::{HttpClient, api};
use shared::models::{Resource, Room, RoomCreate, RoomUpdate};

use super::{Notice, table};

/// Editor state; fixed resources are held as bare ids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomForm {
    pub name: String,
    pub capacity: i32,
    pub fixed_resources: Vec<i64>,
}

impl From<&Room> for RoomForm {
    fn from(room: &Room) -> Self {
        Self {
            name: room.name.clone(),
            capacity: room.capacity,
            fixed_resources: room.fixed_resource_ids(),
        }
    }
}

impl RoomForm {
    pub fn add_resource(&mut self, resource_id: i64) {
        if !self.fixed_resources.contains(&resource_id) {
            self.fixed_resources.push(resource_id);
        }
    }

    pub fn remove_resource(&mut self, resource_id: i64) {
        self.fixed_resources.retain(|id| *id != resource_id);
    }

    pub fn to_create(&self) -> RoomCreate {
        RoomCreate {
            name: self.name.clone(),
            capacity: self.capacity,
            fixed_resources: self.fixed_resources.clone(),
        }
    }

    pub fn to_update(&self) -> RoomUpdate {
        RoomUpdate {
            name: Some(self.name.clone()),
            capacity: Some(self.capacity),
            fixed_resources: Some(self.fixed_resources.clone()),
        }
    }
}

/// Open editor; `room_id` is set when editing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomEditor {
    pub room_id: Option<i64>,
    pub form: RoomForm,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomManagement {
    pub rooms: Vec<Room>,
    pub resources: Vec<Resource>,
    pub editor: Option<RoomEditor>,
    pub error: Option<Notice>,
}

impl RoomManagement {
    pub async fn load<C: HttpClient>(client: &C) -> Self {
        let mut view = Self::default();
        let (rooms, resources) =
            tokio::join!(api::rooms::list(client), api::resources::list(client));
        match rooms {
            Ok(rooms) => view.rooms = rooms,
            Err(e) => view.error = Some(Notice::failed("Failed to fetch rooms", &e)),
        }
        match resources {
            Ok(resources) => view.resources = resources,
            Err(e) => view.error = Some(Notice::failed("Failed to fetch resources", &e)),
        }
        view
    }

    async fn reload<C: HttpClient>(&mut self, client: &C) {
        match api::rooms::list(client).await {
            Ok(rooms) => self.rooms = rooms,
            Err(e) => self.error = Some(Notice::failed("Failed to fetch rooms", &e)),
        }
    }

    /// Resources not attached to any room
    pub fn available_fixed_resources(&self) -> Vec<&Resource> {
        let assigned: Vec<i64> = self
            .rooms
            .iter()
            .flat_map(|r| r.fixed_resources.iter().map(|f| f.id))
            .collect();
        self.resources
            .iter()
            .filter(|r| !assigned.contains(&r.id))
            .collect()
    }

    pub fn open_create(&mut self) {
        self.editor = Some(RoomEditor::default());
    }

    /// Open the editor pre-filled from a listed room
    pub fn open_edit(&mut self, room_id: i64) -> bool {
        match self.rooms.iter().find(|r| r.id == room_id) {
            Some(room) => {
                self.editor = Some(RoomEditor {
                    room_id: Some(room.id),
                    form: RoomForm::from(room),
                });
                true
            }
            None => false,
        }
    }

    pub fn close_editor(&mut self) {
        self.editor = None;
    }

    /// Create or update from the open editor, then reload
    pub async fn submit<C: HttpClient>(&mut self, client: &C) -> bool {
        let Some(editor) = self.editor.clone() else {
            return false;
        };
        let result = match editor.room_id {
            Some(id) => api::rooms::update(client, id, &editor.form.to_update()).await,
            None => api::rooms::create(client, &editor.form.to_create()).await,
        };
        match result {
            Ok(room) => {
                tracing::info!(room_id = room.id, name = %room.name, "Room saved");
                self.editor = None;
                self.error = None;
                self.reload(client).await;
                true
            }
            Err(e) => {
                self.error = Some(Notice::failed("Failed to submit room", &e));
                false
            }
        }
    }

    pub async fn delete<C: HttpClient>(&mut self, client: &C, room_id: i64) -> bool {
        match api::rooms::delete(client, room_id).await {
            Ok(()) => {
                tracing::info!(room_id, "Room deleted");
                self.reload(client).await;
                true
            }
            Err(e) => {
                self.error = Some(Notice::failed("Failed to delete room", &e));
                false
            }
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::from("Room Management\n");
        if let Some(error) = &self.error {
            out.push_str(&format!("{}\n", error.render()));
        }
        let rows: Vec<Vec<String>> = self
            .rooms
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.name.clone(),
                    r.capacity.to_string(),
                    r.fixed_resource_names(),
                ]
            })
            .collect();
        out.push_str(&table(&["Id", "Room Name", "Capacity", "Fixed Resources"], &rows));

        if let Some(editor) = &self.editor {
            out.push_str(if editor.room_id.is_some() { "\nEdit Room\n" } else { "\nAdd Room\n" });
            out.push_str(&format!("  Name: {}\n", editor.form.name));
            out.push_str(&format!("  Capacity: {}\n", editor.form.capacity));
            let names: Vec<&str> = editor
                .form
                .fixed_resources
                .iter()
                .filter_map(|id| self.resources.iter().find(|r| r.id == *id))
                .map(|r| r.name.as_str())
                .collect();
            out.push_str(&format!("  Fixed Resources: {}\n", names.join(", ")));
            let available: Vec<&str> = self
                .available_fixed_resources()
                .into_iter()
                .map(|r| r.name.as_str())
                .collect();
            out.push_str(&format!("  Available: {}\n", available.join(", ")));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Availability, ResourceType};

    fn resource(id: i64, name: &str) -> Resource {
        Resource {
            id,
            name: name.into(),
            resource_type: ResourceType::Fixed,
            availability: Availability::Available,
            created_at: None,
        }
    }

    #[test]
    fn test_form_maps_fixed_resources_to_ids() {
        let room = Room {
            id: 4,
            name: "Lab".into(),
            capacity: 8,
            fixed_resources: vec![resource(10, "Bench"), resource(11, "Hood")],
            created_at: None,
        };
        let form = RoomForm::from(&room);
        assert_eq!(form.name, "Lab");
        assert_eq!(form.capacity, 8);
        assert_eq!(form.fixed_resources, vec![10, 11]);

        let body = serde_json::to_value(form.to_update()).unwrap();
        assert_eq!(body["fixed_resources"], serde_json::json!([10, 11]));
    }

    #[test]
    fn test_available_fixed_resources_excludes_assigned() {
        let view = RoomManagement {
            rooms: vec![Room {
                id: 1,
                name: "A".into(),
                capacity: 2,
                fixed_resources: vec![resource(10, "Bench")],
                created_at: None,
            }],
            resources: vec![resource(10, "Bench"), resource(12, "Screen")],
            ..Default::default()
        };
        let ids: Vec<i64> = view.available_fixed_resources().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![12]);
    }

    #[test]
    fn test_add_remove_resource() {
        let mut form = RoomForm::default();
        form.add_resource(3);
        form.add_resource(3);
        form.add_resource(5);
        form.remove_resource(3);
        assert_eq!(form.fixed_resources, vec![5]);
    }
}
