//! Booking and editing an appointment

use booking_client::{HttpClient, api};
use chrono::NaiveDateTime;
use shared::models::{AppointmentCreate, AppointmentUpdate, Resource, Room, User};

use super::{Notice, RoomDetail, display_time};
use crate::booking::{Candidates, RequestGeneration, Ticket, TimeWindow, fetch_candidates};

pub const ROOM_REQUIRED: &str = "Please select a room.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Book,
    /// Editing an existing appointment, keeping its owner
    Edit { appointment_id: i64, owner_id: i64 },
}

#[derive(Debug)]
pub struct BookingForm {
    pub mode: FormMode,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub room_id: Option<i64>,
    pub resource_ids: Vec<i64>,
    pub rooms: Vec<Room>,
    pub resources: Vec<Resource>,
    pub room_detail: Option<RoomDetail>,
    pub room_error: Option<String>,
    pub resource_error: Option<String>,
    pub time_error: Option<String>,
    pub error: Option<Notice>,
    generation: RequestGeneration,
}

impl Clone for BookingForm {
    fn clone(&self) -> Self {
        Self {
            mode: self.mode,
            start: self.start,
            end: self.end,
            room_id: self.room_id,
            resource_ids: self.resource_ids.clone(),
            rooms: self.rooms.clone(),
            resources: self.resources.clone(),
            room_detail: self.room_detail.clone(),
            room_error: self.room_error.clone(),
            resource_error: self.resource_error.clone(),
            time_error: self.time_error.clone(),
            error: self.error.clone(),
            // A copy starts its own request sequence
            generation: RequestGeneration::new(),
        }
    }
}

impl BookingForm {
    /// Empty form for a new booking
    pub fn new() -> Self {
        Self::with_mode(FormMode::Book)
    }

    fn with_mode(mode: FormMode) -> Self {
        Self {
            mode,
            start: None,
            end: None,
            room_id: None,
            resource_ids: Vec::new(),
            rooms: Vec::new(),
            resources: Vec::new(),
            room_detail: None,
            room_error: None,
            resource_error: None,
            time_error: None,
            error: None,
            generation: RequestGeneration::new(),
        }
    }

    /// Form pre-filled from an existing appointment, candidates loaded
    pub async fn edit<C: HttpClient>(client: &C, appointment_id: i64) -> Self {
        let loaded = async {
            let appointment = api::appointments::get(client, appointment_id).await?;
            let resource_ids = if appointment.resource_ids.is_empty() {
                api::appointment_resources::list(client, appointment_id)
                    .await?
                    .into_iter()
                    .map(|link| link.resource_id)
                    .collect()
            } else {
                appointment.resource_ids.clone()
            };
            Ok::<_, booking_client::ClientError>((appointment, resource_ids))
        };

        match loaded.await {
            Ok((appointment, resource_ids)) => {
                let mut form = Self::with_mode(FormMode::Edit {
                    appointment_id,
                    owner_id: appointment.user_id,
                });
                form.start = Some(appointment.start_time);
                form.end = Some(appointment.end_time);
                form.room_id = Some(appointment.room_id);
                form.resource_ids = resource_ids;
                form.refresh(client).await;
                form
            }
            Err(e) => {
                let mut form = Self::with_mode(FormMode::Edit {
                    appointment_id,
                    owner_id: 0,
                });
                form.error = Some(Notice::failed("Failed to fetch appointment", &e));
                form
            }
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit { .. })
    }

    fn window(&self) -> Option<TimeWindow> {
        TimeWindow::from_parts(self.start, self.end).ok()
    }

    /// Begin an availability request, superseding any in flight
    pub fn begin_refresh(&self) -> Ticket {
        self.generation.next()
    }

    /// Fetch candidates for the current window under a fresh ticket
    pub async fn fetch<C: HttpClient>(&self, client: &C) -> Option<(Ticket, Candidates)> {
        let window = self.window()?;
        let ticket = self.begin_refresh();
        let candidates = fetch_candidates(client, &window, self.room_id).await;
        Some((ticket, candidates))
    }

    /// Apply a fetched result unless a newer request has started since
    pub fn apply(&mut self, ticket: Ticket, candidates: Candidates) -> bool {
        if !self.generation.is_current(ticket) {
            tracing::debug!(?ticket, "Dropping stale availability response");
            return false;
        }
        self.rooms = candidates.rooms;
        self.resources = candidates.resources;
        self.room_error = candidates.room_error;
        self.resource_error = candidates.resource_error;
        self.error = candidates.failure;
        if let Some(id) = self.room_id {
            self.room_detail = self.rooms.iter().find(|r| r.id == id).map(RoomDetail::from);
        }
        true
    }

    /// Reload candidates for the current window; nothing happens until
    /// both ends are set
    pub async fn refresh<C: HttpClient>(&mut self, client: &C) {
        if let Some((ticket, candidates)) = self.fetch(client).await {
            self.apply(ticket, candidates);
        }
    }

    pub async fn set_window<C: HttpClient>(
        &mut self,
        client: &C,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) {
        self.start = start;
        self.end = end;
        self.refresh(client).await;
    }

    pub async fn select_room<C: HttpClient>(&mut self, client: &C, room_id: i64) {
        self.room_id = Some(room_id);
        self.room_detail = self.rooms.iter().find(|r| r.id == room_id).map(RoomDetail::from);
        self.refresh(client).await;
    }

    pub fn toggle_resource(&mut self, resource_id: i64, checked: bool) {
        if checked {
            if !self.resource_ids.contains(&resource_id) {
                self.resource_ids.push(resource_id);
            }
        } else {
            self.resource_ids.retain(|id| *id != resource_id);
        }
    }

    /// Check the form and build the create payload
    ///
    /// Validation messages are left on the form.
    pub fn payload(&mut self, user: &User) -> Option<AppointmentCreate> {
        let window = match TimeWindow::from_parts(self.start, self.end) {
            Ok(window) => window,
            Err(e) => {
                self.time_error = Some(e.to_string());
                return None;
            }
        };
        self.time_error = None;

        let Some(room_id) = self.room_id else {
            self.room_error = Some(ROOM_REQUIRED.to_string());
            return None;
        };

        let user_id = match self.mode {
            FormMode::Book => user.id,
            FormMode::Edit { owner_id, .. } => owner_id,
        };
        Some(AppointmentCreate {
            user_id,
            room_id,
            start_time: window.start(),
            end_time: window.end(),
            resource_ids: self.resource_ids.clone(),
        })
    }

    /// Create or update the appointment; returns the list path on success
    pub async fn submit<C: HttpClient>(&mut self, client: &C, user: &User) -> Option<&'static str> {
        let payload = self.payload(user)?;
        let result = match self.mode {
            FormMode::Book => api::appointments::create(client, &payload).await,
            FormMode::Edit { appointment_id, .. } => {
                api::appointments::update(client, appointment_id, &AppointmentUpdate::from(payload))
                    .await
            }
        };
        match result {
            Ok(appointment) => {
                let action = if self.is_edit() { "updated" } else { "booked" };
                tracing::info!(appointment_id = appointment.id, room_id = appointment.room_id, "Appointment {action}");
                Some("/appointments")
            }
            Err(e) => {
                let context = if self.is_edit() {
                    "Failed to update appointment"
                } else {
                    "Failed to book appointment"
                };
                self.error = Some(Notice::failed(context, &e));
                None
            }
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::from(if self.is_edit() {
            "Edit Appointment\n"
        } else {
            "Make an Appointment\n"
        });
        if let Some(error) = &self.error {
            out.push_str(&format!("{}\n", error.render()));
        }
        if let Some(error) = &self.time_error {
            out.push_str(&format!("{error}\n"));
        }
        let show = |t: &Option<NaiveDateTime>| t.as_ref().map(display_time).unwrap_or_default();
        out.push_str(&format!("  Start Time: {}\n", show(&self.start)));
        out.push_str(&format!("  End Time: {}\n", show(&self.end)));

        out.push_str("  Room:\n");
        for room in &self.rooms {
            let mark = if Some(room.id) == self.room_id { "(x)" } else { "( )" };
            out.push_str(&format!("    {mark} {} [{}]\n", room.name, room.id));
        }
        if let Some(error) = &self.room_error {
            out.push_str(&format!("  {error}\n"));
        }

        out.push_str("  Resources:\n");
        for resource in &self.resources {
            let mark = if self.resource_ids.contains(&resource.id) { "[x]" } else { "[ ]" };
            out.push_str(&format!("    {mark} {} [{}]\n", resource.name, resource.id));
        }
        if let Some(error) = &self.resource_error {
            out.push_str(&format!("  {error}\n"));
        }
        if let Some(detail) = &self.room_detail {
            out.push_str(&detail.render());
        }
        out.push_str(if self.is_edit() {
            "[Update Appointment]\n"
        } else {
            "[Book Appointment]\n"
        });
        out
    }
}

impl Default for BookingForm {
    fn default() -> Self {
        Self::new()
    }
}
