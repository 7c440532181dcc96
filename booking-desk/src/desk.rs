//! Desk - the HTTP client and session behind every screen
//!
//! Owns the one [`SessionStore`] of the process and hands both it and the
//! client to views. Navigation goes through [`Desk::open`], which applies
//! the route guards before loading anything.

use booking_client::{HttpClient, NetworkHttpClient, SessionStore};
use shared::models::User;

use crate::booking::can_modify;
use crate::config::DeskConfig;
use crate::error::{DeskError, DeskResult};
use crate::routes::{Resolution, Route, resolve};
use crate::views::booking_form::FormMode;
use crate::views::resources::ResourceFilter;
use crate::views::{
    AdminPage, AppointmentList, BookingForm, CalendarView, Dashboard, LoginPage, NavBar,
    NotFoundPage, Notice, Page, RegisterPage, ResourceList, ResourceManagement, RoomList,
    RoomManagement,
};

/// A page reached by navigation
#[derive(Debug, Clone)]
pub struct Opened {
    pub route: Route,
    /// Set when a guard sent us somewhere else
    pub redirected_from: Option<String>,
    pub nav: NavBar,
    pub page: Page,
}

impl Opened {
    pub fn render(&self) -> String {
        format!("{}\n\n{}", self.nav.render(), self.page.render())
    }
}

#[derive(Debug)]
pub struct Desk<C: HttpClient> {
    client: C,
    session: SessionStore,
}

impl Desk<NetworkHttpClient> {
    /// Network client from configuration, session restored from disk
    pub fn from_config(config: &DeskConfig) -> DeskResult<Self> {
        let client = config.client_config().build_http_client()?;
        let session = SessionStore::restore(config.session_storage());
        tracing::debug!(api_url = %config.api_url, data_dir = %config.data_dir().display(), "Desk configured");
        Ok(Self::new(client, session))
    }
}

impl<C: HttpClient> Desk<C> {
    pub fn new(mut client: C, session: SessionStore) -> Self {
        session.attach(&mut client);
        Self { client, session }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Logged-in user
    pub fn user(&self) -> DeskResult<&User> {
        if !self.session.is_authenticated() {
            return Err(DeskError::NotAuthenticated);
        }
        self.session.user().ok_or(DeskError::NotAuthenticated)
    }

    /// Logged-in admin
    pub fn admin(&self) -> DeskResult<&User> {
        let user = self.user()?;
        if !user.is_admin() {
            return Err(DeskError::Forbidden("admin only".into()));
        }
        Ok(user)
    }

    /// Log in through the login page; returns where to go next
    pub async fn login(&mut self, username: &str, password: &str) -> DeskResult<String> {
        let mut page = LoginPage::new();
        page.username = username.to_string();
        page.password = password.to_string();
        match page.submit(&mut self.session, &mut self.client).await {
            Some(next) => Ok(next),
            None => Err(DeskError::Invalid(page.error.unwrap_or_default())),
        }
    }

    pub fn logout(&mut self) -> DeskResult<()> {
        self.session.logout(&mut self.client)?;
        Ok(())
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> DeskResult<()> {
        let mut page = RegisterPage::new();
        page.username = username.to_string();
        page.email = email.to_string();
        page.password = password.to_string();
        match page.submit(&self.client).await {
            Some(_) => Ok(()),
            None => Err(page
                .error
                .map(DeskError::View)
                .unwrap_or_else(|| DeskError::Invalid("Registration failed".into()))),
        }
    }

    /// Navigate to `path`
    pub async fn open(&self, path: &str) -> Opened {
        let (route, redirected_from, page) = match resolve(path, self.session.session()) {
            Resolution::Render(route) => (route, None, self.load(route).await),
            Resolution::Redirect { to, from } => {
                tracing::info!(path, to = %to.path(), "Redirected by route guard");
                let page = match (&to, &from) {
                    (Route::Login, Some(from)) => Page::Login(LoginPage::returning_to(from.clone())),
                    _ => self.load(to).await,
                };
                (to, Some(path.to_string()), page)
            }
        };
        Opened {
            route,
            redirected_from,
            nav: NavBar::for_session(self.session.session()),
            page,
        }
    }

    async fn load(&self, route: Route) -> Page {
        let client = &self.client;
        let user = self.session.user();
        match (route, user) {
            (Route::Login, _) => Page::Login(LoginPage::new()),
            (Route::Register, _) => Page::Register(RegisterPage::new()),
            (Route::NotFound, _) => Page::NotFound(NotFoundPage),
            // Token without a user record: treat as logged out
            (_, None) => Page::Login(LoginPage::returning_to(route.path())),
            (Route::Dashboard, Some(user)) => Page::Dashboard(Dashboard::for_user(Some(user))),
            (Route::Appointments, Some(user)) => {
                Page::Appointments(AppointmentList::load(client, user).await)
            }
            (Route::NewAppointment, Some(_)) => Page::Booking(BookingForm::new()),
            (Route::EditAppointment(id), Some(user)) => {
                let mut form = BookingForm::edit(client, id).await;
                if let FormMode::Edit { owner_id, .. } = form.mode
                    && form.error.is_none()
                    && !can_modify(owner_id, user.id, user.role)
                {
                    tracing::info!(appointment_id = id, user_id = user.id, "Edit not permitted");
                    form.error = Some(Notice::message(
                        "You do not have permission to edit this appointment.",
                    ));
                }
                Page::Booking(form)
            }
            (Route::Resources, Some(_)) => {
                Page::Resources(ResourceList::load(client, ResourceFilter::default()).await)
            }
            (Route::Rooms, Some(_)) => Page::Rooms(RoomList::load(client).await),
            (Route::Calendar, Some(user)) => {
                Page::Calendar(CalendarView::load(client, user, false).await)
            }
            (Route::Admin, Some(_)) => Page::Admin(AdminPage::default()),
            (Route::AdminResources, Some(_)) => {
                Page::AdminResources(ResourceManagement::load(client).await)
            }
            (Route::AdminRooms, Some(_)) => Page::AdminRooms(RoomManagement::load(client).await),
        }
    }
}
