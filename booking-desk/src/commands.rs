//! CLI command handlers
//!
//! Each handler drives the same view models the pages use and returns the
//! text to print.

use booking_client::HttpClient;
use shared::models::User;

use crate::booking::{TimeWindow, can_modify, fetch_candidates};
use crate::cli::{Command, ResourceCommand, RoomCommand};
use crate::desk::Desk;
use crate::error::{DeskError, DeskResult};
use crate::views::booking_form::FormMode;
use crate::views::resources::ResourceFilter;
use crate::views::{
    AppointmentList, BookingForm, CalendarView, ResourceList, ResourceManagement, RoomManagement,
};

pub async fn execute<C: HttpClient>(desk: &mut Desk<C>, command: Command) -> DeskResult<String> {
    match command {
        Command::Login { username, password } => {
            let next = desk.login(&username, &password).await?;
            let opened = desk.open(&next).await;
            Ok(opened.render())
        }
        Command::Logout => {
            desk.logout()?;
            Ok("Logged out\n".into())
        }
        Command::Register {
            username,
            email,
            password,
        } => {
            desk.register(&username, &email, &password).await?;
            Ok(format!("Registered {username}. Log in with `booking-desk login`.\n"))
        }
        Command::Whoami => {
            let user = desk.user()?;
            Ok(describe(user))
        }
        Command::Open { path } => Ok(desk.open(&path).await.render()),
        Command::Book {
            start,
            end,
            room,
            resources,
        } => book(desk, start, end, room, resources).await,
        Command::Edit {
            id,
            start,
            end,
            room,
            add_resources,
            remove_resources,
        } => {
            let user = desk.user()?.clone();
            let client = desk.client();
            let mut form = BookingForm::edit(client, id).await;
            if let Some(error) = form.error.take() {
                return Err(DeskError::View(error));
            }
            let permitted = owner_of(&form).is_some_and(|owner| can_modify(owner, user.id, user.role));
            if !permitted {
                return Err(DeskError::Forbidden(format!("appointment {id} belongs to another user")));
            }
            if start.is_some() || end.is_some() {
                let start = start.or(form.start);
                let end = end.or(form.end);
                form.set_window(client, start, end).await;
            }
            if let Some(room) = room {
                form.select_room(client, room).await;
            }
            for resource in add_resources {
                form.toggle_resource(resource, true);
            }
            for resource in remove_resources {
                form.toggle_resource(resource, false);
            }
            submit_form(form, client, &user).await
        }
        Command::Cancel { id } => {
            let user = desk.user()?.clone();
            let mut list = AppointmentList::load(desk.client(), &user).await;
            if let Some(error) = list.error.take() {
                return Err(DeskError::View(error));
            }
            if list.cancel(desk.client(), id).await {
                Ok(format!("Cancelled appointment {id}\n"))
            } else if let Some(error) = list.error.take() {
                Err(DeskError::View(error))
            } else {
                Err(DeskError::Forbidden(format!("cannot cancel appointment {id}")))
            }
        }
        Command::Available { start, end } => {
            desk.user()?;
            let window = TimeWindow::new(start, end).map_err(|e| DeskError::Invalid(e.to_string()))?;
            let candidates = fetch_candidates(desk.client(), &window, None).await;
            if let Some(failure) = candidates.failure {
                return Err(DeskError::View(failure));
            }
            let mut out = String::from("Rooms:\n");
            for room in &candidates.rooms {
                out.push_str(&format!("  [{}] {} (capacity {})\n", room.id, room.name, room.capacity));
            }
            if let Some(message) = &candidates.room_error {
                out.push_str(&format!("  {message}\n"));
            }
            out.push_str("Movable resources:\n");
            for resource in &candidates.resources {
                out.push_str(&format!("  [{}] {}\n", resource.id, resource.name));
            }
            if let Some(message) = &candidates.resource_error {
                out.push_str(&format!("  {message}\n"));
            }
            Ok(out)
        }
        Command::Resources {
            resource_type,
            availability,
            start,
            end,
        } => {
            desk.user()?;
            let filter = ResourceFilter {
                resource_type,
                availability,
            };
            if start.is_none() && end.is_none() {
                return Ok(ResourceList::load(desk.client(), filter).await.render());
            }
            let window =
                TimeWindow::from_parts(start, end).map_err(|e| DeskError::Invalid(e.to_string()))?;
            let mut list = ResourceList {
                filter,
                ..ResourceList::default()
            };
            list.find_available_movable(desk.client(), window).await;
            match list.error.take() {
                Some(error) => Err(DeskError::View(error)),
                None => Ok(list.render()),
            }
        }
        Command::Calendar { all, event } => {
            let user = desk.user()?.clone();
            let view = CalendarView::load(desk.client(), &user, all).await;
            match event {
                Some(id) => view
                    .event_detail(id)
                    .ok_or_else(|| DeskError::Invalid(format!("no event {id} in this calendar"))),
                None => Ok(view.render()),
            }
        }
        Command::Room(command) => {
            desk.admin()?;
            room_command(desk.client(), command).await
        }
        Command::Resource(command) => {
            desk.admin()?;
            resource_command(desk.client(), command).await
        }
    }
}

fn describe(user: &User) -> String {
    format!(
        "{} <{}> ({}, id {})\n",
        user.username,
        user.email,
        user.role.as_str(),
        user.id
    )
}

fn owner_of(form: &BookingForm) -> Option<i64> {
    match form.mode {
        FormMode::Edit { owner_id, .. } => Some(owner_id),
        FormMode::Book => None,
    }
}

async fn book<C: HttpClient>(
    desk: &Desk<C>,
    start: chrono::NaiveDateTime,
    end: chrono::NaiveDateTime,
    room: i64,
    resources: Vec<i64>,
) -> DeskResult<String> {
    let user = desk.user()?.clone();
    let client = desk.client();
    let mut form = BookingForm::new();
    form.set_window(client, Some(start), Some(end)).await;
    form.select_room(client, room).await;
    for resource in resources {
        form.toggle_resource(resource, true);
    }
    submit_form(form, client, &user).await
}

async fn submit_form<C: HttpClient>(
    mut form: BookingForm,
    client: &C,
    user: &User,
) -> DeskResult<String> {
    if form.submit(client, user).await.is_some() {
        let list = AppointmentList::load(client, user).await;
        return Ok(list.render());
    }
    if let Some(message) = form.time_error.take().or_else(|| form.room_error.take()) {
        return Err(DeskError::Invalid(message));
    }
    match form.error.take() {
        Some(notice) => Err(DeskError::View(notice)),
        None => Err(DeskError::Invalid("Appointment was not saved".into())),
    }
}

async fn room_command<C: HttpClient>(client: &C, command: RoomCommand) -> DeskResult<String> {
    let mut view = RoomManagement::load(client).await;
    if let Some(error) = view.error.take() {
        return Err(DeskError::View(error));
    }
    let saved = match command {
        RoomCommand::Create {
            name,
            capacity,
            fixed,
        } => {
            view.open_create();
            if let Some(editor) = view.editor.as_mut() {
                editor.form.name = name;
                editor.form.capacity = capacity;
                for id in fixed {
                    editor.form.add_resource(id);
                }
            }
            view.submit(client).await
        }
        RoomCommand::Update {
            id,
            name,
            capacity,
            add_fixed,
            remove_fixed,
        } => {
            if !view.open_edit(id) {
                return Err(DeskError::Invalid(format!("no room with id {id}")));
            }
            if let Some(editor) = view.editor.as_mut() {
                if let Some(name) = name {
                    editor.form.name = name;
                }
                if let Some(capacity) = capacity {
                    editor.form.capacity = capacity;
                }
                for id in add_fixed {
                    editor.form.add_resource(id);
                }
                for id in remove_fixed {
                    editor.form.remove_resource(id);
                }
            }
            view.submit(client).await
        }
        RoomCommand::Delete { id } => view.delete(client, id).await,
    };
    match (saved, view.error.take()) {
        (true, _) => Ok(view.render()),
        (false, Some(error)) => Err(DeskError::View(error)),
        (false, None) => Err(DeskError::Invalid("Room was not saved".into())),
    }
}

async fn resource_command<C: HttpClient>(
    client: &C,
    command: ResourceCommand,
) -> DeskResult<String> {
    let mut view = ResourceManagement::load(client).await;
    if let Some(error) = view.error.take() {
        return Err(DeskError::View(error));
    }
    let saved = match command {
        ResourceCommand::Create {
            name,
            resource_type,
            availability,
        } => {
            view.open_create();
            if let Some(editor) = view.editor.as_mut() {
                editor.form.name = name;
                editor.form.resource_type = resource_type;
                editor.form.availability = availability;
            }
            view.submit(client).await
        }
        ResourceCommand::Update {
            id,
            name,
            resource_type,
            availability,
        } => {
            if !view.open_edit(id) {
                return Err(DeskError::Invalid(format!("no resource with id {id}")));
            }
            if let Some(editor) = view.editor.as_mut() {
                if let Some(name) = name {
                    editor.form.name = name;
                }
                if let Some(resource_type) = resource_type {
                    editor.form.resource_type = resource_type;
                }
                if let Some(availability) = availability {
                    editor.form.availability = availability;
                }
            }
            view.submit(client).await
        }
        ResourceCommand::Delete { id } => view.delete(client, id).await,
    };
    match (saved, view.error.take()) {
        (true, _) => Ok(view.render()),
        (false, Some(error)) => Err(DeskError::View(error)),
        (false, None) => Err(DeskError::Invalid("Resource was not saved".into())),
    }
}
