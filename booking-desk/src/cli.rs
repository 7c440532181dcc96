//! Command line interface

use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use shared::models::{Availability, ResourceType};

use crate::config::DeskConfig;

#[derive(Debug, Parser)]
#[command(
    name = "booking-desk",
    about = "Book rooms and resources against a booking backend",
    version
)]
pub struct Cli {
    #[command(flatten)]
    pub config: DeskConfig,

    #[command(subcommand)]
    pub command: Command,
}

/// `YYYY-MM-DDTHH:MM[:SS]`
pub fn parse_time(raw: &str) -> Result<NaiveDateTime, String> {
    shared::time::parse_timestamp(raw)
        .ok_or_else(|| format!("invalid date-time '{raw}', expected YYYY-MM-DDTHH:MM"))
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and remember the session
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "BOOKING_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the session
    Logout,
    /// Create an account
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "BOOKING_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Show the logged-in user
    Whoami,
    /// Render any page, e.g. `/appointments` or `/admin/rooms`
    Open { path: String },
    /// Book a room
    Book {
        #[arg(long, value_parser = parse_time)]
        start: NaiveDateTime,
        #[arg(long, value_parser = parse_time)]
        end: NaiveDateTime,
        #[arg(long)]
        room: i64,
        /// Movable resource id, repeatable
        #[arg(long = "resource")]
        resources: Vec<i64>,
    },
    /// Change an appointment; unset options keep their current value
    Edit {
        id: i64,
        #[arg(long, value_parser = parse_time)]
        start: Option<NaiveDateTime>,
        #[arg(long, value_parser = parse_time)]
        end: Option<NaiveDateTime>,
        #[arg(long)]
        room: Option<i64>,
        #[arg(long = "add-resource")]
        add_resources: Vec<i64>,
        #[arg(long = "remove-resource")]
        remove_resources: Vec<i64>,
    },
    /// Cancel an appointment
    Cancel { id: i64 },
    /// Rooms and movable resources free for a window
    Available {
        #[arg(long, value_parser = parse_time)]
        start: NaiveDateTime,
        #[arg(long, value_parser = parse_time)]
        end: NaiveDateTime,
    },
    /// Resource list with optional filters, or the movable resources free
    /// for `--start`..`--end`
    Resources {
        #[arg(long = "type")]
        resource_type: Option<ResourceType>,
        #[arg(long)]
        availability: Option<Availability>,
        #[arg(long, value_parser = parse_time)]
        start: Option<NaiveDateTime>,
        #[arg(long, value_parser = parse_time)]
        end: Option<NaiveDateTime>,
    },
    /// Calendar of appointments
    Calendar {
        /// Everyone's appointments, not just yours
        #[arg(long)]
        all: bool,
        /// Show the details of one event
        #[arg(long)]
        event: Option<i64>,
    },
    /// Manage rooms (admin)
    #[command(subcommand)]
    Room(RoomCommand),
    /// Manage resources (admin)
    #[command(subcommand)]
    Resource(ResourceCommand),
}

#[derive(Debug, Subcommand)]
pub enum RoomCommand {
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        capacity: i32,
        /// Fixed resource id, repeatable
        #[arg(long = "fixed")]
        fixed: Vec<i64>,
    },
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        capacity: Option<i32>,
        #[arg(long = "add-fixed")]
        add_fixed: Vec<i64>,
        #[arg(long = "remove-fixed")]
        remove_fixed: Vec<i64>,
    },
    Delete { id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum ResourceCommand {
    Create {
        #[arg(long)]
        name: String,
        #[arg(long = "type", default_value = "fixed")]
        resource_type: ResourceType,
        #[arg(long, default_value = "available")]
        availability: Availability,
    },
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long = "type")]
        resource_type: Option<ResourceType>,
        #[arg(long)]
        availability: Option<Availability>,
    },
    Delete { id: i64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_book_command() {
        let cli = Cli::try_parse_from([
            "booking-desk",
            "--api-url",
            "http://backend:8000",
            "book",
            "--start",
            "2024-05-01T09:00",
            "--end",
            "2024-05-01T10:00",
            "--room",
            "3",
            "--resource",
            "7",
            "--resource",
            "8",
        ])
        .unwrap();
        assert_eq!(cli.config.api_url, "http://backend:8000");
        match cli.command {
            Command::Book { room, resources, .. } => {
                assert_eq!(room, 3);
                assert_eq!(resources, vec![7, 8]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_default_api_url_has_prefix() {
        let cli = Cli::try_parse_from(["booking-desk", "whoami"]).unwrap();
        if std::env::var_os("BOOKING_API_URL").is_none() {
            assert_eq!(cli.config.api_url, "http://localhost:8000/api");
        }
        assert!(matches!(cli.command, Command::Whoami));
    }

    #[test]
    fn test_parse_resources_window() {
        let cli = Cli::try_parse_from([
            "booking-desk",
            "resources",
            "--start",
            "2024-05-01T09:00",
            "--end",
            "2024-05-01T10:00",
        ])
        .unwrap();
        match cli.command {
            Command::Resources {
                start, end, resource_type, ..
            } => {
                assert_eq!(start, parse_time("2024-05-01T09:00").ok());
                assert_eq!(end, parse_time("2024-05-01T10:00").ok());
                assert!(resource_type.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_bad_time() {
        assert!(parse_time("tomorrow").is_err());
        assert!(
            Cli::try_parse_from(["booking-desk", "available", "--start", "x", "--end", "y"])
                .is_err()
        );
    }
}
