//! View models
//!
//! Each screen is a struct that loads through the API client, keeps the
//! derived state it displays, and renders itself as text. Load failures
//! are kept on the view as a [`Notice`] instead of being returned, so a
//! page with an error still renders.

pub mod appointments;
pub mod auth;
pub mod booking_form;
pub mod calendar;
pub mod home;
pub mod resource_management;
pub mod resources;
pub mod room_management;
pub mod rooms;

use std::fmt::Write as _;

use booking_client::ClientError;
use chrono::NaiveDateTime;
use shared::ErrorKind;

pub use appointments::AppointmentList;
pub use auth::{LoginPage, RegisterPage};
pub use booking_form::BookingForm;
pub use calendar::CalendarView;
pub use home::{AdminPage, Dashboard, NavBar, NotFoundPage};
pub use resource_management::ResourceManagement;
pub use resources::ResourceList;
pub use room_management::RoomManagement;
pub use rooms::{RoomDetail, RoomList};

/// A failure shown on a view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub kind: Option<ErrorKind>,
}

impl Notice {
    /// Log `error` and keep only `context` and its kind for display
    pub fn failed(context: &str, error: &ClientError) -> Self {
        let kind = error.kind();
        tracing::error!(kind = %kind, error = %error, "{context}");
        Self {
            message: context.to_string(),
            kind: Some(kind),
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: None,
        }
    }

    pub fn render(&self) -> String {
        match self.kind {
            Some(kind) => format!("Error: {} ({})", self.message, kind.hint()),
            None => format!("Error: {}", self.message),
        }
    }
}

/// Any screen the desk can show
#[derive(Debug, Clone)]
pub enum Page {
    Login(LoginPage),
    Register(RegisterPage),
    Dashboard(Dashboard),
    Appointments(AppointmentList),
    Booking(BookingForm),
    Resources(ResourceList),
    Rooms(RoomList),
    Calendar(CalendarView),
    Admin(AdminPage),
    AdminResources(ResourceManagement),
    AdminRooms(RoomManagement),
    NotFound(NotFoundPage),
}

impl Page {
    pub fn render(&self) -> String {
        match self {
            Self::Login(page) => page.render(),
            Self::Register(page) => page.render(),
            Self::Dashboard(page) => page.render(),
            Self::Appointments(page) => page.render(),
            Self::Booking(page) => page.render(),
            Self::Resources(page) => page.render(),
            Self::Rooms(page) => page.render(),
            Self::Calendar(page) => page.render(),
            Self::Admin(page) => page.render(),
            Self::AdminResources(page) => page.render(),
            Self::AdminRooms(page) => page.render(),
            Self::NotFound(page) => page.render(),
        }
    }
}

/// Date-time as shown in tables
pub(crate) fn display_time(value: &NaiveDateTime) -> String {
    value.format("%Y-%m-%d %H:%M").to_string()
}

/// Left-aligned text table
pub(crate) fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}", pad_row(headers.iter().copied(), &widths));
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", rule.join("  "));
    for row in rows {
        let _ = writeln!(out, "{}", pad_row(row.iter().map(String::as_str), &widths));
    }
    out
}

fn pad_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    padded.join("  ").trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_error(code: u16) -> ClientError {
        let status = booking_client::StatusCode::from_u16(code).unwrap();
        ClientError::from_status(status, "")
    }

    #[test]
    fn test_notice_keeps_context_and_hint() {
        let notice = Notice::failed("Failed to fetch rooms", &status_error(503));
        assert_eq!(notice.message, "Failed to fetch rooms");
        assert_eq!(notice.kind, Some(ErrorKind::Server));
        assert!(notice.render().starts_with("Error: Failed to fetch rooms ("));
    }

    #[test]
    fn test_table_pads_columns() {
        let out = table(&["Name", "Capacity"], &[vec!["Boardroom".into(), "12".into()]]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Name       Capacity");
        assert_eq!(lines[2], "Boardroom  12");
    }
}
