//! Appointment rows enriched with room, resource and owner names

use booking_client::{ClientError, ClientResult, HttpClient, api};
use futures::future::try_join_all;
use shared::ErrorKind;
use shared::models::{Appointment, Resource, User};

pub const UNKNOWN_ROOM: &str = "Unknown Room";

/// An appointment plus everything the list and calendar display
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentDetails {
    pub appointment: Appointment,
    pub room_name: String,
    pub fixed_resources: Vec<Resource>,
    pub movable_resources: Vec<Resource>,
    /// Only resolved when the viewer can see other people's appointments
    pub username: Option<String>,
}

impl AppointmentDetails {
    /// Linked resource names, or "None"
    pub fn resource_names(&self) -> String {
        join_names(&self.movable_resources)
    }

    pub fn fixed_resource_names(&self) -> String {
        join_names(&self.fixed_resources)
    }
}

fn join_names(resources: &[Resource]) -> String {
    if resources.is_empty() {
        return "None".to_string();
    }
    resources
        .iter()
        .map(|r| r.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

async fn owner_name<C: HttpClient>(client: &C, user_id: i64) -> ClientResult<String> {
    let user: User = api::users::get(client, user_id).await?;
    Ok(user.username)
}

async fn details<C: HttpClient>(
    client: &C,
    appointment: Appointment,
    with_owner: bool,
) -> ClientResult<AppointmentDetails> {
    let room = async {
        match api::rooms::get(client, appointment.room_id).await {
            Ok(room) => Ok(Some(room)),
            // A deleted room still leaves the appointment listable
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    };
    let resources = async {
        let links = api::appointment_resources::list(client, appointment.id).await?;
        try_join_all(links.iter().map(|l| api::resources::get(client, l.resource_id))).await
    };
    let owner = async {
        if with_owner {
            owner_name(client, appointment.user_id).await.map(Some)
        } else {
            Ok::<_, ClientError>(None)
        }
    };

    let (room, movable_resources, username) = tokio::try_join!(room, resources, owner)?;
    let (room_name, fixed_resources) = match room {
        Some(room) => (room.name, room.fixed_resources),
        None => (UNKNOWN_ROOM.to_string(), Vec::new()),
    };

    Ok(AppointmentDetails {
        appointment,
        room_name,
        fixed_resources,
        movable_resources,
        username,
    })
}

/// Enrich every appointment concurrently; any failed lookup fails the batch
pub async fn enrich<C: HttpClient>(
    client: &C,
    appointments: Vec<Appointment>,
    with_owner: bool,
) -> ClientResult<Vec<AppointmentDetails>> {
    try_join_all(
        appointments
            .into_iter()
            .map(|appointment| details(client, appointment, with_owner)),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Availability, ResourceType};

    #[test]
    fn test_names_fall_back_to_none() {
        let start = shared::time::parse_timestamp("2024-01-01T09:00").unwrap();
        let mut details = AppointmentDetails {
            appointment: Appointment {
                id: 1,
                user_id: 1,
                room_id: 1,
                start_time: start,
                end_time: start,
                resource_ids: Vec::new(),
                created_at: None,
            },
            room_name: UNKNOWN_ROOM.into(),
            fixed_resources: Vec::new(),
            movable_resources: Vec::new(),
            username: None,
        };
        assert_eq!(details.resource_names(), "None");

        for name in ["Projector", "Speaker"] {
            details.movable_resources.push(Resource {
                id: 0,
                name: name.into(),
                resource_type: ResourceType::Movable,
                availability: Availability::Available,
                created_at: None,
            });
        }
        assert_eq!(details.resource_names(), "Projector, Speaker");
    }
}
