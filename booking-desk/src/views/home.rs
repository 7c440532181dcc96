//! Navigation bar, dashboard, admin landing page and the 404 page

use std::fmt::Write as _;

use booking_client::Session;
use shared::models::{Role, User};

/// A labelled link to a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub label: &'static str,
    pub path: &'static str,
}

const fn link(label: &'static str, path: &'static str) -> Link {
    Link { label, path }
}

fn render_links(out: &mut String, links: &[Link]) {
    for l in links {
        let _ = writeln!(out, "  - {} ({})", l.label, l.path);
    }
}

/// Top navigation, shown above every page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavBar {
    pub links: Vec<Link>,
    /// Logout when a token is present, Login otherwise
    pub session_link: Link,
}

impl NavBar {
    pub fn for_session(session: &Session) -> Self {
        let role = session.user.as_ref().map(|u| u.role);
        let links = match role {
            Some(Role::User) => vec![
                link("My Appointments", "/appointments"),
                link("Create Appointment", "/appointments/new"),
            ],
            Some(Role::Admin) => vec![
                link("Appointments", "/appointments"),
                link("Admin Dashboard", "/admin"),
            ],
            None => Vec::new(),
        };
        let session_link = if session.is_authenticated() {
            link("Logout", "logout")
        } else {
            link("Login", "/login")
        };
        Self {
            links,
            session_link,
        }
    }

    pub fn render(&self) -> String {
        let mut items: Vec<String> = vec!["Appointment & Resource Management (/)".into()];
        items.extend(self.links.iter().map(|l| format!("{} ({})", l.label, l.path)));
        items.push(self.session_link.label.to_string());
        items.join(" | ")
    }
}

/// Landing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub entries: Vec<Link>,
}

impl Dashboard {
    pub fn for_user(user: Option<&User>) -> Self {
        let mut entries = vec![
            link("View Rooms", "/rooms"),
            link("View Resources", "/resources"),
            link("View Appointments", "/appointments"),
        ];
        match user.map(|u| u.role) {
            Some(Role::User) => entries.push(link("Make an Appointment", "/appointments/new")),
            Some(Role::Admin) => entries.push(link("Admin Dashboard", "/admin")),
            None => {}
        }
        Self { entries }
    }

    pub fn render(&self) -> String {
        let mut out = String::from("Welcome to the Appointment and Resource Management System\n");
        render_links(&mut out, &self.entries);
        out
    }
}

/// Admin landing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminPage {
    pub entries: Vec<Link>,
}

impl Default for AdminPage {
    fn default() -> Self {
        Self {
            entries: vec![
                link("Manage Resources", "/admin/resources"),
                link("Manage Rooms", "/admin/rooms"),
            ],
        }
    }
}

impl AdminPage {
    pub fn render(&self) -> String {
        let mut out = String::from("Admin Dashboard\n");
        render_links(&mut out, &self.entries);
        out
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotFoundPage;

impl NotFoundPage {
    pub fn render(&self) -> String {
        "404 Page Not Found\n".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> User {
        User {
            id: 1,
            username: "sam".into(),
            email: "sam@example.com".into(),
            role,
            created_at: None,
        }
    }

    fn paths(links: &[Link]) -> Vec<&'static str> {
        links.iter().map(|l| l.path).collect()
    }

    #[test]
    fn test_dashboard_entries_by_role() {
        let member = Dashboard::for_user(Some(&user(Role::User)));
        assert!(paths(&member.entries).contains(&"/appointments/new"));
        assert!(!paths(&member.entries).contains(&"/admin"));

        let admin = Dashboard::for_user(Some(&user(Role::Admin)));
        assert!(paths(&admin.entries).contains(&"/admin"));
        assert!(!paths(&admin.entries).contains(&"/appointments/new"));
    }

    #[test]
    fn test_nav_login_or_logout() {
        let anonymous = NavBar::for_session(&Session::default());
        assert!(anonymous.links.is_empty());
        assert_eq!(anonymous.session_link.label, "Login");

        let session = Session {
            token: Some("t".into()),
            user: Some(user(Role::Admin)),
        };
        let nav = NavBar::for_session(&session);
        assert_eq!(nav.session_link.label, "Logout");
        assert_eq!(paths(&nav.links), vec!["/appointments", "/admin"]);
    }

    #[test]
    fn test_not_found_text() {
        assert_eq!(NotFoundPage.render(), "404 Page Not Found\n");
    }
}
