//! Appointment list grouped into upcoming, in progress and past

use booking_client::{HttpClient, api};
use chrono::NaiveDateTime;
use shared::models::User;

use super::{Notice, display_time, table};
use crate::booking::{AppointmentDetails, TimeBucket, can_modify_appointment, enrich};

#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentList {
    pub user: User,
    pub rows: Vec<AppointmentDetails>,
    pub error: Option<Notice>,
}

impl AppointmentList {
    /// Admins see every appointment with its owner; others see their own
    pub async fn load<C: HttpClient>(client: &C, user: &User) -> Self {
        let admin = user.is_admin();
        let owner_filter = if admin { None } else { Some(user.id) };

        let loaded = async {
            let appointments = api::appointments::list(client, owner_filter).await?;
            enrich(client, appointments, admin).await
        };

        match loaded.await {
            Ok(rows) => Self {
                user: user.clone(),
                rows,
                error: None,
            },
            Err(e) => Self {
                user: user.clone(),
                rows: Vec::new(),
                error: Some(Notice::failed("Failed to fetch appointments", &e)),
            },
        }
    }

    /// Rows in `bucket` at `now`, in load order
    pub fn bucket(&self, bucket: TimeBucket, now: NaiveDateTime) -> Vec<&AppointmentDetails> {
        self.rows
            .iter()
            .filter(|d| {
                TimeBucket::classify(d.appointment.start_time, d.appointment.end_time, now) == bucket
            })
            .collect()
    }

    fn find(&self, appointment_id: i64) -> Option<&AppointmentDetails> {
        self.rows.iter().find(|d| d.appointment.id == appointment_id)
    }

    pub fn can_modify(&self, appointment_id: i64) -> bool {
        self.find(appointment_id)
            .is_some_and(|d| can_modify_appointment(&d.appointment, &self.user))
    }

    /// Path of the edit form, if the user may edit this appointment
    pub fn edit_path(&self, appointment_id: i64) -> Option<String> {
        if self.can_modify(appointment_id) {
            Some(format!("/appointments/edit/{appointment_id}"))
        } else {
            tracing::info!(appointment_id, user_id = self.user.id, "Edit not permitted");
            None
        }
    }

    /// Cancel an appointment and drop its row
    ///
    /// Returns false when not permitted or when the backend refused.
    pub async fn cancel<C: HttpClient>(&mut self, client: &C, appointment_id: i64) -> bool {
        if !self.can_modify(appointment_id) {
            tracing::info!(appointment_id, user_id = self.user.id, "Cancel not permitted");
            return false;
        }
        match api::appointments::delete(client, appointment_id).await {
            Ok(_) => {
                self.rows.retain(|d| d.appointment.id != appointment_id);
                tracing::info!(appointment_id, "Appointment cancelled");
                true
            }
            Err(e) => {
                self.error = Some(Notice::failed("Failed to delete appointment", &e));
                false
            }
        }
    }

    pub fn render(&self) -> String {
        self.render_at(shared::time::now())
    }

    pub fn render_at(&self, now: NaiveDateTime) -> String {
        if let Some(error) = &self.error {
            return format!("{}\n", error.render());
        }
        let admin = self.user.is_admin();
        let mut out = String::new();
        for bucket in TimeBucket::ALL {
            let rows = self.bucket(bucket, now);
            if rows.is_empty() {
                continue;
            }
            // Only upcoming appointments can still be changed
            let actions = bucket == TimeBucket::Upcoming && !admin;

            let mut headers = Vec::new();
            if admin {
                headers.push("Username");
            }
            headers.extend(["Id", "Room", "Start Time", "End Time", "Resources"]);
            if actions {
                headers.push("Actions");
            }

            let cells: Vec<Vec<String>> = rows
                .iter()
                .map(|d| {
                    let mut row = Vec::new();
                    if admin {
                        row.push(d.username.clone().unwrap_or_default());
                    }
                    row.push(d.appointment.id.to_string());
                    row.push(d.room_name.clone());
                    row.push(display_time(&d.appointment.start_time));
                    row.push(display_time(&d.appointment.end_time));
                    row.push(d.resource_names());
                    if actions {
                        let own = d.appointment.user_id == self.user.id;
                        row.push(if own { "Edit, Cancel".into() } else { String::new() });
                    }
                    row
                })
                .collect();

            out.push_str(bucket.heading());
            out.push('\n');
            out.push_str(&table(&headers, &cells));
            out.push('\n');
        }
        if out.is_empty() {
            out.push_str("No appointments\n");
        }
        out
    }
}
