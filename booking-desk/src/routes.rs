//! Route table and guards
//!
//! Guards are synchronous checks against the current [`Session`]; the
//! backend is never consulted.

use booking_client::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Dashboard,
    Appointments,
    NewAppointment,
    EditAppointment(i64),
    Resources,
    Rooms,
    Calendar,
    Admin,
    AdminResources,
    AdminRooms,
    NotFound,
}

/// Who may open a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
    Admin,
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Self::Dashboard,
            ["login"] => Self::Login,
            ["register"] => Self::Register,
            ["appointments"] => Self::Appointments,
            ["appointments", "new"] => Self::NewAppointment,
            ["appointments", "edit", id] => match id.parse() {
                Ok(id) => Self::EditAppointment(id),
                Err(_) => Self::NotFound,
            },
            ["resources"] => Self::Resources,
            ["rooms"] => Self::Rooms,
            ["calendar"] => Self::Calendar,
            ["admin"] => Self::Admin,
            ["admin", "resources"] => Self::AdminResources,
            ["admin", "rooms"] => Self::AdminRooms,
            _ => Self::NotFound,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Login => "/login".into(),
            Self::Register => "/register".into(),
            Self::Dashboard => "/".into(),
            Self::Appointments => "/appointments".into(),
            Self::NewAppointment => "/appointments/new".into(),
            Self::EditAppointment(id) => format!("/appointments/edit/{id}"),
            Self::Resources => "/resources".into(),
            Self::Rooms => "/rooms".into(),
            Self::Calendar => "/calendar".into(),
            Self::Admin => "/admin".into(),
            Self::AdminResources => "/admin/resources".into(),
            Self::AdminRooms => "/admin/rooms".into(),
            Self::NotFound => "/404".into(),
        }
    }

    pub fn access(&self) -> Access {
        match self {
            Self::Login | Self::Register | Self::NotFound => Access::Public,
            Self::Admin | Self::AdminResources | Self::AdminRooms => Access::Admin,
            _ => Access::Authenticated,
        }
    }
}

/// Outcome of navigating to a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Render(Route),
    /// Guard failed; `from` is the path to come back to after login
    Redirect { to: Route, from: Option<String> },
}

pub fn resolve(path: &str, session: &Session) -> Resolution {
    let route = Route::parse(path);
    match route.access() {
        Access::Public => Resolution::Render(route),
        _ if !session.is_authenticated() => Resolution::Redirect {
            to: Route::Login,
            from: Some(path.to_string()),
        },
        Access::Admin if !session.is_admin() => Resolution::Redirect {
            to: Route::Dashboard,
            from: None,
        },
        _ => Resolution::Render(route),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Role, User};

    fn session(role: Option<Role>) -> Session {
        match role {
            None => Session::default(),
            Some(role) => Session {
                token: Some("token".into()),
                user: Some(User {
                    id: 1,
                    username: "u".into(),
                    email: "u@example.com".into(),
                    role,
                    created_at: None,
                }),
            },
        }
    }

    #[test]
    fn test_parse_paths() {
        assert_eq!(Route::parse("/"), Route::Dashboard);
        assert_eq!(Route::parse("/appointments/edit/12"), Route::EditAppointment(12));
        assert_eq!(Route::parse("/appointments/edit/abc"), Route::NotFound);
        assert_eq!(Route::parse("/admin/rooms/"), Route::AdminRooms);
        assert_eq!(Route::parse("/nowhere"), Route::NotFound);
        assert_eq!(Route::parse("/rooms?sort=name"), Route::Rooms);
    }

    #[test]
    fn test_path_roundtrip() {
        for route in [Route::Dashboard, Route::EditAppointment(3), Route::AdminResources] {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn test_anonymous_is_sent_to_login() {
        assert_eq!(
            resolve("/calendar", &session(None)),
            Resolution::Redirect {
                to: Route::Login,
                from: Some("/calendar".into())
            }
        );
        assert_eq!(resolve("/login", &session(None)), Resolution::Render(Route::Login));
        assert_eq!(resolve("/missing", &session(None)), Resolution::Render(Route::NotFound));
    }

    #[test]
    fn test_admin_routes_need_admin() {
        assert_eq!(
            resolve("/admin/rooms", &session(Some(Role::User))),
            Resolution::Redirect {
                to: Route::Dashboard,
                from: None
            }
        );
        assert_eq!(
            resolve("/admin/rooms", &session(Some(Role::Admin))),
            Resolution::Render(Route::AdminRooms)
        );
        assert_eq!(
            resolve("/rooms", &session(Some(Role::User))),
            Resolution::Render(Route::Rooms)
        );
    }
}
