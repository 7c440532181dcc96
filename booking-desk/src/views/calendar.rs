//! Calendar of appointments

use booking_client::{HttpClient, api};
use chrono::NaiveDateTime;
use shared::models::User;

use super::Notice;
use crate::booking::{AppointmentDetails, enrich};

/// `Tue, January 2, 9:00 AM – 10:30 AM`
pub fn format_span(start: &NaiveDateTime, end: &NaiveDateTime) -> String {
    format!(
        "{} – {}",
        start.format("%a, %B %-d, %-I:%M %p"),
        end.format("%-I:%M %p")
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub id: i64,
    /// Room name
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub details: AppointmentDetails,
}

impl CalendarEvent {
    fn from_details(details: AppointmentDetails) -> Self {
        Self {
            id: details.appointment.id,
            title: details.room_name.clone(),
            start: details.appointment.start_time,
            end: details.appointment.end_time,
            details,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarView {
    pub user: User,
    /// Non-admins may switch from their own appointments to everyone's
    pub view_all: bool,
    pub events: Vec<CalendarEvent>,
    pub error: Option<Notice>,
}

impl CalendarView {
    pub async fn load<C: HttpClient>(client: &C, user: &User, view_all: bool) -> Self {
        let mut view = Self {
            user: user.clone(),
            view_all: view_all && !user.is_admin(),
            events: Vec::new(),
            error: None,
        };
        view.reload(client).await;
        view
    }

    fn shows_everyone(&self) -> bool {
        self.user.is_admin() || self.view_all
    }

    async fn reload<C: HttpClient>(&mut self, client: &C) {
        let everyone = self.shows_everyone();
        let owner_filter = if everyone { None } else { Some(self.user.id) };
        let loaded = async {
            let appointments = api::appointments::list(client, owner_filter).await?;
            enrich(client, appointments, everyone).await
        };
        match loaded.await {
            Ok(details) => {
                let mut events: Vec<CalendarEvent> =
                    details.into_iter().map(CalendarEvent::from_details).collect();
                events.sort_by_key(|e| (e.start, e.id));
                self.events = events;
                self.error = None;
            }
            Err(e) => {
                self.events.clear();
                self.error = Some(Notice::failed("Failed to fetch appointments", &e));
            }
        }
    }

    /// Switch between own and all appointments; admins always see all
    pub async fn toggle_view_all<C: HttpClient>(&mut self, client: &C) {
        if self.user.is_admin() {
            return;
        }
        self.view_all = !self.view_all;
        self.reload(client).await;
    }

    pub fn title(&self) -> &'static str {
        if self.shows_everyone() {
            "All Appointments"
        } else {
            "My Appointments"
        }
    }

    /// Popover text for one event
    pub fn event_detail(&self, event_id: i64) -> Option<String> {
        let event = self.events.iter().find(|e| e.id == event_id)?;
        let mut out = format!(
            "Room: {}\nFixed Resources: {}\nMovable Resources: {}\nDate & Time: {}\n",
            event.title,
            event.details.fixed_resource_names(),
            event.details.resource_names(),
            format_span(&event.start, &event.end),
        );
        if self.shows_everyone() {
            out.push_str(&format!(
                "User: {}\n",
                event.details.username.as_deref().unwrap_or_default()
            ));
        }
        Some(out)
    }

    pub fn render(&self) -> String {
        let mut out = format!("{}\n", self.title());
        if !self.user.is_admin() {
            let toggle = if self.view_all {
                "View My Appointments"
            } else {
                "View All Appointments"
            };
            out.push_str(&format!("[{toggle}]\n"));
        }
        if let Some(error) = &self.error {
            out.push_str(&format!("{}\n", error.render()));
            return out;
        }
        for event in &self.events {
            out.push_str(&format!(
                "#{} {}: {}\n",
                event.id,
                event.title,
                format_span(&event.start, &event.end)
            ));
        }
        out
    }
}
