//! In-memory booking backend
//!
//! Implements [`HttpClient`] by routing requests to a small in-process
//! model of the REST API, so views and the session store can be tested
//! without a server. Clones share state; each clone keeps its own token.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::StatusCode;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Value, json};
use shared::models::{
    Appointment, AppointmentResource, Availability, Resource, ResourceType, Role, Room, User,
};
use shared::time::parse_timestamp;

use crate::session::token::encode_unsigned;
use crate::{ClientError, ClientResult, HttpClient};

#[derive(Debug, Clone)]
struct StoredRoom {
    id: i64,
    name: String,
    capacity: i32,
    fixed: Vec<i64>,
}

#[derive(Debug, Default)]
struct BackendState {
    next_id: i64,
    users: Vec<(User, String)>,
    tokens: HashMap<String, i64>,
    rooms: Vec<StoredRoom>,
    resources: Vec<Resource>,
    appointments: Vec<Appointment>,
    links: Vec<AppointmentResource>,
    /// Rooms the availability query hides regardless of bookings
    hidden_rooms: HashSet<i64>,
    /// Path prefix -> forced status
    failures: Vec<(String, StatusCode)>,
    requests: Vec<String>,
}

impl BackendState {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn room_json(&self, room: &StoredRoom) -> Value {
        let fixed: Vec<&Resource> = room
            .fixed
            .iter()
            .filter_map(|id| self.resources.iter().find(|r| r.id == *id))
            .collect();
        json!({
            "id": room.id,
            "name": room.name,
            "capacity": room.capacity,
            "fixed_resources": fixed,
        })
    }

    fn overlapping(&self, start: NaiveDateTime, end: NaiveDateTime) -> impl Iterator<Item = &Appointment> {
        self.appointments
            .iter()
            .filter(move |a| a.start_time < end && start < a.end_time)
    }
}

/// In-memory backend
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<BackendState>>,
    token: Option<String>,
}

type Handled = Result<Value, (StatusCode, String)>;

fn not_found(what: &str) -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, format!("{what} not found"))
}

fn bad_request(msg: impl Into<String>) -> (StatusCode, String) {
    (StatusCode::UNPROCESSABLE_ENTITY, msg.into())
}

fn parse_id(segment: &str) -> Result<i64, (StatusCode, String)> {
    segment
        .parse()
        .map_err(|_| bad_request(format!("invalid id: {segment}")))
}

fn field<T: DeserializeOwned>(body: &Value, name: &str) -> Result<T, (StatusCode, String)> {
    body.get(name)
        .cloned()
        .ok_or_else(|| bad_request(format!("missing field: {name}")))
        .and_then(|v| {
            serde_json::from_value(v).map_err(|e| bad_request(format!("invalid {name}: {e}")))
        })
}

fn opt_field<T: DeserializeOwned>(body: &Value, name: &str) -> Result<Option<T>, (StatusCode, String)> {
    match body.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => serde_json::from_value(v.clone())
            .map(Some)
            .map_err(|e| bad_request(format!("invalid {name}: {e}"))),
    }
}

fn time_field(body: &Value, name: &str) -> Result<NaiveDateTime, (StatusCode, String)> {
    let raw: String = field(body, name)?;
    parse_timestamp(&raw).ok_or_else(|| bad_request(format!("invalid {name}")))
}

fn query_time(query: &HashMap<String, String>, name: &str) -> Result<NaiveDateTime, (StatusCode, String)> {
    query
        .get(name)
        .and_then(|raw| parse_timestamp(raw))
        .ok_or_else(|| bad_request(format!("missing or invalid {name}")))
}

fn to_json<T: Serialize>(value: &T) -> Handled {
    serde_json::to_value(value).map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BackendState> {
        // A panicking test poisons the lock; the data is still usable
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Add an account that can log in
    pub fn add_user(&self, username: &str, password: &str, role: Role) -> User {
        let mut state = self.lock();
        let user = User {
            id: state.next_id(),
            username: username.to_string(),
            email: format!("{username}@example.com"),
            role,
            created_at: None,
        };
        state.users.push((user.clone(), password.to_string()));
        user
    }

    pub fn add_resource(&self, name: &str, resource_type: ResourceType, availability: Availability) -> Resource {
        let mut state = self.lock();
        let resource = Resource {
            id: state.next_id(),
            name: name.to_string(),
            resource_type,
            availability,
            created_at: None,
        };
        state.resources.push(resource.clone());
        resource
    }

    pub fn add_room(&self, name: &str, capacity: i32, fixed: &[i64]) -> Room {
        let mut state = self.lock();
        let room = StoredRoom {
            id: state.next_id(),
            name: name.to_string(),
            capacity,
            fixed: fixed.to_vec(),
        };
        let fixed_resources = fixed
            .iter()
            .filter_map(|id| state.resources.iter().find(|r| r.id == *id).cloned())
            .collect();
        state.rooms.push(room.clone());
        Room {
            id: room.id,
            name: room.name,
            capacity: room.capacity,
            fixed_resources,
            created_at: None,
        }
    }

    pub fn add_appointment(
        &self,
        user_id: i64,
        room_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
        resource_ids: &[i64],
    ) -> Appointment {
        let mut state = self.lock();
        let appointment = Appointment {
            id: state.next_id(),
            user_id,
            room_id,
            start_time: start,
            end_time: end,
            resource_ids: Vec::new(),
            created_at: None,
        };
        state.appointments.push(appointment.clone());
        for resource_id in resource_ids {
            let id = state.next_id();
            state.links.push(AppointmentResource {
                id,
                appointment_id: appointment.id,
                resource_id: *resource_id,
                created_at: None,
            });
        }
        appointment
    }

    /// Exclude a room from `/rooms/available` even when it is free
    pub fn hide_room(&self, room_id: i64) {
        self.lock().hidden_rooms.insert(room_id);
    }

    /// Answer every request whose path starts with `prefix` with `status`
    pub fn fail_path(&self, prefix: &str, status: StatusCode) {
        self.lock().failures.push((prefix.to_string(), status));
    }

    /// Requests seen so far, as `METHOD path?query`
    pub fn requests(&self) -> Vec<String> {
        self.lock().requests.clone()
    }

    pub fn resources(&self) -> Vec<Resource> {
        self.lock().resources.clone()
    }

    pub fn appointments(&self) -> Vec<Appointment> {
        self.lock().appointments.clone()
    }

    pub fn links(&self) -> Vec<AppointmentResource> {
        self.lock().links.clone()
    }

    fn dispatch(&self, method: &str, path: &str, body: Option<Value>) -> ClientResult<Value> {
        let path = path.trim_start_matches('/');
        let (route, query) = match path.split_once('?') {
            Some((route, query)) => (route, query),
            None => (path, ""),
        };
        let query: HashMap<String, String> = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .filter_map(|pair| pair.split_once('='))
            .map(|(k, v)| {
                let value = urlencoding::decode(v).map(|c| c.into_owned()).unwrap_or_default();
                (k.to_string(), value)
            })
            .collect();
        let segments: Vec<&str> = route.trim_end_matches('/').split('/').collect();
        let body = body.unwrap_or(Value::Null);

        let mut state = self.lock();
        state.requests.push(format!("{method} {path}"));

        if let Some((_, status)) = state.failures.iter().find(|(prefix, _)| route.starts_with(prefix.as_str())) {
            let status = *status;
            return Err(ClientError::from_status(status, r#"{"detail":"forced failure"}"#));
        }

        let public = matches!(
            (method, segments.as_slice()),
            ("POST", ["users", "login"]) | ("POST", ["users", "register"])
        );
        if !public {
            let known = self
                .token
                .as_ref()
                .is_some_and(|t| state.tokens.contains_key(t));
            if !known {
                return Err(ClientError::from_status(
                    StatusCode::UNAUTHORIZED,
                    r#"{"detail":"Not authenticated"}"#,
                ));
            }
        }

        let result = Self::route(&mut state, method, &segments, &query, &body);
        result.map_err(|(status, detail)| {
            ClientError::from_status(status, &json!({ "detail": detail }).to_string())
        })
    }

    fn route(
        state: &mut BackendState,
        method: &str,
        segments: &[&str],
        query: &HashMap<String, String>,
        body: &Value,
    ) -> Handled {
        match (method, segments) {
            // ===== users =====
            ("POST", ["users", "login"]) => {
                let username: String = field(body, "username")?;
                let password: String = field(body, "password")?;
                let user_id = state
                    .users
                    .iter()
                    .find(|(u, p)| u.username == username && *p == password)
                    .map(|(u, _)| u.id)
                    .ok_or((StatusCode::UNAUTHORIZED, "Invalid username or password".to_string()))?;
                let token = encode_unsigned(&json!({ "sub": user_id.to_string() }));
                state.tokens.insert(token.clone(), user_id);
                Ok(json!({ "access_token": token, "token_type": "bearer" }))
            }
            ("POST", ["users", "register"]) | ("POST", ["users"]) => {
                let username: String = field(body, "username")?;
                if state.users.iter().any(|(u, _)| u.username == username) {
                    return Err((StatusCode::BAD_REQUEST, "Username already registered".into()));
                }
                let user = User {
                    id: state.next_id(),
                    username,
                    email: field(body, "email")?,
                    role: Role::User,
                    created_at: None,
                };
                state.users.push((user.clone(), field(body, "password")?));
                to_json(&user)
            }
            ("GET", ["users"]) => {
                let users: Vec<&User> = state.users.iter().map(|(u, _)| u).collect();
                to_json(&users)
            }
            ("GET", ["users", id]) => {
                let id = parse_id(id)?;
                let (user, _) = state.users.iter().find(|(u, _)| u.id == id).ok_or_else(|| not_found("User"))?;
                to_json(user)
            }
            ("PUT", ["users", id]) => {
                let id = parse_id(id)?;
                let (user, password) = state
                    .users
                    .iter_mut()
                    .find(|(u, _)| u.id == id)
                    .ok_or_else(|| not_found("User"))?;
                if let Some(v) = opt_field(body, "username")? {
                    user.username = v;
                }
                if let Some(v) = opt_field(body, "email")? {
                    user.email = v;
                }
                if let Some(v) = opt_field(body, "role")? {
                    user.role = v;
                }
                if let Some(v) = opt_field(body, "password")? {
                    *password = v;
                }
                to_json(&*user)
            }
            ("DELETE", ["users", id]) => {
                let id = parse_id(id)?;
                let index = state.users.iter().position(|(u, _)| u.id == id).ok_or_else(|| not_found("User"))?;
                let (user, _) = state.users.remove(index);
                to_json(&user)
            }

            // ===== rooms =====
            ("GET", ["rooms"]) => Ok(Value::Array(
                state.rooms.iter().map(|r| state.room_json(r)).collect(),
            )),
            ("POST", ["rooms"]) => {
                let room = StoredRoom {
                    id: state.next_id(),
                    name: field(body, "name")?,
                    capacity: field(body, "capacity")?,
                    fixed: opt_field(body, "fixed_resources")?.unwrap_or_default(),
                };
                state.rooms.push(room.clone());
                Ok(state.room_json(&room))
            }
            ("GET", ["rooms", "available"]) => {
                let start = query_time(query, "start_time")?;
                let end = query_time(query, "end_time")?;
                let busy: HashSet<i64> = state.overlapping(start, end).map(|a| a.room_id).collect();
                Ok(Value::Array(
                    state
                        .rooms
                        .iter()
                        .filter(|r| !busy.contains(&r.id) && !state.hidden_rooms.contains(&r.id))
                        .map(|r| state.room_json(r))
                        .collect(),
                ))
            }
            ("GET", ["rooms", id]) => {
                let id = parse_id(id)?;
                let room = state.rooms.iter().find(|r| r.id == id).ok_or_else(|| not_found("Room"))?;
                Ok(state.room_json(room))
            }
            ("PUT", ["rooms", id]) => {
                let id = parse_id(id)?;
                let name = opt_field(body, "name")?;
                let capacity = opt_field(body, "capacity")?;
                let fixed = opt_field(body, "fixed_resources")?;
                let room = state.rooms.iter_mut().find(|r| r.id == id).ok_or_else(|| not_found("Room"))?;
                if let Some(v) = name {
                    room.name = v;
                }
                if let Some(v) = capacity {
                    room.capacity = v;
                }
                if let Some(v) = fixed {
                    room.fixed = v;
                }
                let room = room.clone();
                Ok(state.room_json(&room))
            }
            ("DELETE", ["rooms", id]) => {
                let id = parse_id(id)?;
                let index = state.rooms.iter().position(|r| r.id == id).ok_or_else(|| not_found("Room"))?;
                state.rooms.remove(index);
                Ok(json!({ "detail": "Room deleted" }))
            }

            // ===== resources =====
            ("GET", ["resources"]) => to_json(&state.resources),
            ("POST", ["resources"]) => {
                let resource = Resource {
                    id: state.next_id(),
                    name: field(body, "name")?,
                    resource_type: field(body, "type")?,
                    availability: field(body, "availability")?,
                    created_at: None,
                };
                state.resources.push(resource.clone());
                to_json(&resource)
            }
            ("GET", ["resources", "available"]) => {
                let available: Vec<&Resource> = state
                    .resources
                    .iter()
                    .filter(|r| r.availability == Availability::Available)
                    .collect();
                to_json(&available)
            }
            ("GET", ["resources", "movable", "available"]) => {
                let start = query_time(query, "start_time")?;
                let end = query_time(query, "end_time")?;
                let busy_appointments: HashSet<i64> = state.overlapping(start, end).map(|a| a.id).collect();
                let busy: HashSet<i64> = state
                    .links
                    .iter()
                    .filter(|l| busy_appointments.contains(&l.appointment_id))
                    .map(|l| l.resource_id)
                    .collect();
                let free: Vec<&Resource> = state
                    .resources
                    .iter()
                    .filter(|r| {
                        r.resource_type == ResourceType::Movable
                            && r.availability == Availability::Available
                            && !busy.contains(&r.id)
                    })
                    .collect();
                to_json(&free)
            }
            ("GET", ["resources", id]) => {
                let id = parse_id(id)?;
                let resource = state.resources.iter().find(|r| r.id == id).ok_or_else(|| not_found("Resource"))?;
                to_json(resource)
            }
            ("PUT", ["resources", id]) => {
                let id = parse_id(id)?;
                let name = opt_field(body, "name")?;
                let resource_type = opt_field(body, "type")?;
                let availability = opt_field(body, "availability")?;
                let resource = state
                    .resources
                    .iter_mut()
                    .find(|r| r.id == id)
                    .ok_or_else(|| not_found("Resource"))?;
                if let Some(v) = name {
                    resource.name = v;
                }
                if let Some(v) = resource_type {
                    resource.resource_type = v;
                }
                if let Some(v) = availability {
                    resource.availability = v;
                }
                to_json(&*resource)
            }
            ("DELETE", ["resources", id]) => {
                let id = parse_id(id)?;
                let index = state.resources.iter().position(|r| r.id == id).ok_or_else(|| not_found("Resource"))?;
                let resource = state.resources.remove(index);
                to_json(&resource)
            }

            // ===== appointments =====
            ("GET", ["appointments"]) => {
                let user_id = match query.get("user_id") {
                    Some(raw) => Some(parse_id(raw)?),
                    None => None,
                };
                let list: Vec<&Appointment> = state
                    .appointments
                    .iter()
                    .filter(|a| user_id.is_none_or(|id| a.user_id == id))
                    .collect();
                to_json(&list)
            }
            ("POST", ["appointments"]) => {
                let appointment = Appointment {
                    id: state.next_id(),
                    user_id: field(body, "user_id")?,
                    room_id: field(body, "room_id")?,
                    start_time: time_field(body, "start_time")?,
                    end_time: time_field(body, "end_time")?,
                    resource_ids: Vec::new(),
                    created_at: None,
                };
                if !state.rooms.iter().any(|r| r.id == appointment.room_id) {
                    return Err(not_found("Room"));
                }
                let resource_ids: Vec<i64> = opt_field(body, "resource_ids")?.unwrap_or_default();
                state.appointments.push(appointment.clone());
                for resource_id in resource_ids {
                    let id = state.next_id();
                    state.links.push(AppointmentResource {
                        id,
                        appointment_id: appointment.id,
                        resource_id,
                        created_at: None,
                    });
                }
                to_json(&appointment)
            }
            ("GET", ["appointments", "filter"]) => {
                let room_id = match query.get("room_id") {
                    Some(raw) => Some(parse_id(raw)?),
                    None => None,
                };
                let start = query.get("start_time").and_then(|raw| parse_timestamp(raw));
                let end = query.get("end_time").and_then(|raw| parse_timestamp(raw));
                let list: Vec<&Appointment> = state
                    .appointments
                    .iter()
                    .filter(|a| room_id.is_none_or(|id| a.room_id == id))
                    .filter(|a| start.is_none_or(|s| a.start_time >= s))
                    .filter(|a| end.is_none_or(|e| a.end_time <= e))
                    .collect();
                to_json(&list)
            }
            ("GET", ["appointments", id]) => {
                let id = parse_id(id)?;
                let appointment = state
                    .appointments
                    .iter()
                    .find(|a| a.id == id)
                    .ok_or_else(|| not_found("Appointment"))?;
                to_json(appointment)
            }
            ("PUT", ["appointments", id]) => {
                let id = parse_id(id)?;
                let user_id = opt_field(body, "user_id")?;
                let room_id = opt_field(body, "room_id")?;
                let start = time_field(body, "start_time")?;
                let end = time_field(body, "end_time")?;
                let resource_ids: Option<Vec<i64>> = opt_field(body, "resource_ids")?;
                let appointment = state
                    .appointments
                    .iter_mut()
                    .find(|a| a.id == id)
                    .ok_or_else(|| not_found("Appointment"))?;
                if let Some(v) = user_id {
                    appointment.user_id = v;
                }
                if let Some(v) = room_id {
                    appointment.room_id = v;
                }
                appointment.start_time = start;
                appointment.end_time = end;
                let updated = appointment.clone();
                if let Some(resource_ids) = resource_ids {
                    state.links.retain(|l| l.appointment_id != id);
                    for resource_id in resource_ids {
                        let link_id = state.next_id();
                        state.links.push(AppointmentResource {
                            id: link_id,
                            appointment_id: id,
                            resource_id,
                            created_at: None,
                        });
                    }
                }
                to_json(&updated)
            }
            ("DELETE", ["appointments", id]) => {
                let id = parse_id(id)?;
                let index = state
                    .appointments
                    .iter()
                    .position(|a| a.id == id)
                    .ok_or_else(|| not_found("Appointment"))?;
                let appointment = state.appointments.remove(index);
                state.links.retain(|l| l.appointment_id != id);
                to_json(&appointment)
            }

            // ===== appointment-resources =====
            ("GET", ["appointment-resources"]) => {
                let appointment_id = query
                    .get("appointment_id")
                    .ok_or_else(|| bad_request("missing appointment_id"))
                    .and_then(|raw| parse_id(raw))?;
                let links: Vec<&AppointmentResource> = state
                    .links
                    .iter()
                    .filter(|l| l.appointment_id == appointment_id)
                    .collect();
                to_json(&links)
            }
            ("POST", ["appointment-resources"]) => {
                let link = AppointmentResource {
                    id: state.next_id(),
                    appointment_id: field(body, "appointment_id")?,
                    resource_id: field(body, "resource_id")?,
                    created_at: None,
                };
                state.links.push(link.clone());
                to_json(&link)
            }
            ("GET", ["appointment-resources", "movable", id]) => {
                let appointment_id = parse_id(id)?;
                let links: Vec<&AppointmentResource> = state
                    .links
                    .iter()
                    .filter(|l| l.appointment_id == appointment_id)
                    .filter(|l| {
                        state
                            .resources
                            .iter()
                            .any(|r| r.id == l.resource_id && r.resource_type == ResourceType::Movable)
                    })
                    .collect();
                to_json(&links)
            }
            ("GET", ["appointment-resources", id]) => {
                let id = parse_id(id)?;
                let link = state.links.iter().find(|l| l.id == id).ok_or_else(|| not_found("Appointment resource"))?;
                to_json(link)
            }
            ("PUT", ["appointment-resources", id]) => {
                let id = parse_id(id)?;
                let appointment_id = field(body, "appointment_id")?;
                let resource_id = field(body, "resource_id")?;
                let link = state
                    .links
                    .iter_mut()
                    .find(|l| l.id == id)
                    .ok_or_else(|| not_found("Appointment resource"))?;
                link.appointment_id = appointment_id;
                link.resource_id = resource_id;
                to_json(&*link)
            }
            ("DELETE", ["appointment-resources", id]) => {
                let id = parse_id(id)?;
                let index = state
                    .links
                    .iter()
                    .position(|l| l.id == id)
                    .ok_or_else(|| not_found("Appointment resource"))?;
                let link = state.links.remove(index);
                to_json(&link)
            }

            _ => Err((StatusCode::NOT_FOUND, "Not Found".into())),
        }
    }

    fn call<T: DeserializeOwned>(&self, method: &str, path: &str, body: Option<Value>) -> ClientResult<T> {
        let value = self.dispatch(method, path, body)?;
        serde_json::from_value(value).map_err(Into::into)
    }
}

#[async_trait]
impl HttpClient for MemoryBackend {
    async fn get<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T> {
        self.call("GET", path, None)
    }

    async fn post<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let body = serde_json::to_value(body)?;
        self.call("POST", path, Some(body))
    }

    async fn post_form<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        form: &B,
    ) -> ClientResult<T> {
        let body = serde_json::to_value(form)?;
        self.call("POST", path, Some(body))
    }

    async fn put<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let body = serde_json::to_value(body)?;
        self.call("PUT", path, Some(body))
    }

    async fn delete<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T> {
        self.call("DELETE", path, None)
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }
}
