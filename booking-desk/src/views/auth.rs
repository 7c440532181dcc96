//! Login and registration pages

use booking_client::{HttpClient, LoginRequest, SessionStore, api};
use shared::models::UserCreate;

use super::Notice;

pub const INVALID_CREDENTIALS: &str = "Invalid username or password. Please try again.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginPage {
    pub username: String,
    pub password: String,
    pub error: Option<String>,
    /// Where to go after logging in; the dashboard when unset
    pub return_to: Option<String>,
}

impl LoginPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn returning_to(path: impl Into<String>) -> Self {
        Self {
            return_to: Some(path.into()),
            ..Self::default()
        }
    }

    /// Log in with the entered credentials
    ///
    /// Returns the path to navigate to on success. Any failure shows the
    /// same message; the cause is only logged.
    pub async fn submit<C: HttpClient>(
        &mut self,
        session: &mut SessionStore,
        client: &mut C,
    ) -> Option<String> {
        let credentials = LoginRequest::new(self.username.trim(), self.password.as_str());
        match session.login(client, &credentials).await {
            Ok(_) => {
                self.error = None;
                self.password.clear();
                Some(self.return_to.clone().unwrap_or_else(|| "/".to_string()))
            }
            Err(e) => {
                tracing::warn!(username = %credentials.username, kind = %e.kind(), "Login rejected");
                self.error = Some(INVALID_CREDENTIALS.to_string());
                None
            }
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::from("Login\n");
        out.push_str(&format!("  Username: {}\n", self.username));
        out.push_str("  Password: ********\n");
        if let Some(error) = &self.error {
            out.push_str(&format!("{error}\n"));
        }
        out.push_str("Don't have an account? Register (/register)\n");
        out
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterPage {
    pub username: String,
    pub email: String,
    pub password: String,
    pub error: Option<Notice>,
}

impl RegisterPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the account; returns the login path on success
    pub async fn submit<C: HttpClient>(&mut self, client: &C) -> Option<&'static str> {
        let user = UserCreate {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        };
        match api::users::register(client, &user).await {
            Ok(created) => {
                tracing::info!(user_id = created.id, username = %created.username, "Registered");
                self.error = None;
                Some("/login")
            }
            Err(e) => {
                self.error = Some(Notice::failed("Failed to register", &e));
                None
            }
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::from("Register\n");
        out.push_str(&format!("  Username: {}\n", self.username));
        out.push_str(&format!("  Email: {}\n", self.email));
        if let Some(error) = &self.error {
            out.push_str(&format!("{}\n", error.render()));
        }
        out.push_str("Already have an account? Login (/login)\n");
        out
    }
}
