// booking-client/tests/api_endpoints.rs
// Request lines and results of the REST wrappers against the in-memory backend

use booking_client::api;
use booking_client::testing::MemoryBackend;
use booking_client::{HttpClient, LoginRequest};
use chrono::NaiveDateTime;
use shared::models::{
    AppointmentFilter, AppointmentResourceCreate, Availability, ResourceType, Role, UserCreate,
    UserUpdate,
};
use shared::time::parse_timestamp;

fn at(raw: &str) -> NaiveDateTime {
    parse_timestamp(raw).unwrap()
}

async fn logged_in(backend: &MemoryBackend) -> MemoryBackend {
    let mut client = backend.clone();
    let token = api::users::login(&client, &LoginRequest::new("root", "hunter2"))
        .await
        .unwrap();
    client.set_token(Some(token.access_token));
    client
}

fn last_request(backend: &MemoryBackend) -> String {
    backend.requests().last().cloned().unwrap_or_default()
}

#[tokio::test]
async fn test_appointment_filter_query() {
    let backend = MemoryBackend::new();
    backend.add_user("root", "hunter2", Role::Admin);
    let studio = backend.add_room("Studio", 4, &[]);
    let annex = backend.add_room("Annex", 2, &[]);
    let inside = backend.add_appointment(1, studio.id, at("2030-01-01T09:30"), at("2030-01-01T10:00"), &[]);
    backend.add_appointment(1, studio.id, at("2030-01-02T09:30"), at("2030-01-02T10:00"), &[]);
    backend.add_appointment(1, annex.id, at("2030-01-01T09:30"), at("2030-01-01T10:00"), &[]);
    let client = logged_in(&backend).await;

    let filter = AppointmentFilter {
        room_id: Some(studio.id),
        start_time: Some(at("2030-01-01T09:00")),
        end_time: Some(at("2030-01-01T18:00")),
    };
    let found = api::appointments::filter(&client, &filter).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, inside.id);
    assert_eq!(
        last_request(&backend),
        format!(
            "GET appointments/filter?room_id={}&start_time=2030-01-01T09%3A00%3A00&end_time=2030-01-01T18%3A00%3A00",
            studio.id
        )
    );

    // Unset fields are left out of the query
    let by_room = AppointmentFilter {
        room_id: Some(annex.id),
        ..AppointmentFilter::default()
    };
    assert_eq!(api::appointments::filter(&client, &by_room).await.unwrap().len(), 1);
    assert_eq!(last_request(&backend), format!("GET appointments/filter?room_id={}", annex.id));

    let everything = api::appointments::filter(&client, &AppointmentFilter::default())
        .await
        .unwrap();
    assert_eq!(everything.len(), 3);
    assert_eq!(last_request(&backend), "GET appointments/filter");
}

#[tokio::test]
async fn test_appointment_resource_links() {
    let backend = MemoryBackend::new();
    backend.add_user("root", "hunter2", Role::Admin);
    let studio = backend.add_room("Studio", 4, &[]);
    let cart = backend.add_resource("Cart", ResourceType::Movable, Availability::Available);
    let screen = backend.add_resource("Screen", ResourceType::Fixed, Availability::Available);
    let appointment = backend.add_appointment(1, studio.id, at("2030-01-01T09:00"), at("2030-01-01T10:00"), &[]);
    let client = logged_in(&backend).await;

    let link = api::appointment_resources::create(
        &client,
        &AppointmentResourceCreate {
            appointment_id: appointment.id,
            resource_id: cart.id,
        },
    )
    .await
    .unwrap();
    assert_eq!(link.resource_id, cart.id);
    assert_eq!(last_request(&backend), "POST appointment-resources");

    let fetched = api::appointment_resources::get(&client, link.id).await.unwrap();
    assert_eq!(fetched, link);
    assert_eq!(last_request(&backend), format!("GET appointment-resources/{}", link.id));

    let fixed = api::appointment_resources::create(
        &client,
        &AppointmentResourceCreate {
            appointment_id: appointment.id,
            resource_id: screen.id,
        },
    )
    .await
    .unwrap();

    let movable = api::appointment_resources::movable(&client, appointment.id).await.unwrap();
    assert_eq!(movable.len(), 1);
    assert_eq!(movable[0].id, link.id);
    assert_eq!(
        last_request(&backend),
        format!("GET appointment-resources/movable/{}", appointment.id)
    );

    let updated = api::appointment_resources::update(
        &client,
        fixed.id,
        &AppointmentResourceCreate {
            appointment_id: appointment.id,
            resource_id: cart.id,
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.resource_id, cart.id);
    assert_eq!(last_request(&backend), format!("PUT appointment-resources/{}", fixed.id));

    let removed = api::appointment_resources::delete(&client, link.id).await.unwrap();
    assert_eq!(removed.id, link.id);
    assert_eq!(last_request(&backend), format!("DELETE appointment-resources/{}", link.id));
    assert_eq!(backend.links().len(), 1);
}

#[tokio::test]
async fn test_available_resources_use_flag() {
    let backend = MemoryBackend::new();
    backend.add_user("root", "hunter2", Role::Admin);
    backend.add_resource("Cart", ResourceType::Movable, Availability::Available);
    backend.add_resource("Broken lamp", ResourceType::Movable, Availability::Unavailable);
    backend.add_resource("Screen", ResourceType::Fixed, Availability::Available);
    let client = logged_in(&backend).await;

    let available = api::resources::available(&client).await.unwrap();
    let names: Vec<&str> = available.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Cart", "Screen"]);
    assert_eq!(last_request(&backend), "GET resources/available");
}

#[tokio::test]
async fn test_user_admin_endpoints() {
    let backend = MemoryBackend::new();
    backend.add_user("root", "hunter2", Role::Admin);
    let client = logged_in(&backend).await;

    let created = api::users::create(
        &client,
        &UserCreate {
            username: "carol".into(),
            email: "carol@example.com".into(),
            password: "pw".into(),
        },
    )
    .await
    .unwrap();
    assert_eq!(created.role, Role::User);
    assert_eq!(last_request(&backend), "POST users");

    let users = api::users::list(&client).await.unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(last_request(&backend), "GET users");

    let update = UserUpdate {
        role: Some(Role::Admin),
        ..UserUpdate::default()
    };
    let promoted = api::users::update(&client, created.id, &update).await.unwrap();
    assert!(promoted.is_admin());
    assert_eq!(promoted.email, "carol@example.com");
    assert_eq!(last_request(&backend), format!("PUT users/{}", created.id));

    let deleted = api::users::delete(&client, created.id).await.unwrap();
    assert_eq!(deleted.username, "carol");
    assert_eq!(last_request(&backend), format!("DELETE users/{}", created.id));
    assert_eq!(api::users::list(&client).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_wrappers_need_a_token() {
    let backend = MemoryBackend::new();
    let err = api::users::list(&backend).await.unwrap_err();
    assert_eq!(err.kind(), shared::ErrorKind::Authorization);
}
