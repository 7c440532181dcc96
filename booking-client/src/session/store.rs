//! SessionStore - current token and user
//!
//! Lifecycle: `restore` at startup, `login`/`logout` are the only
//! mutations, and each one assigns the whole session in a single step.

use serde::{Deserialize, Serialize};
use shared::ErrorKind;
use shared::client::LoginRequest;
use shared::models::User;
use thiserror::Error;

use super::{SessionStorage, token};
use crate::{ClientError, HttpClient, api};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl SessionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Client(e) => e.kind(),
            Self::Storage(_) => ErrorKind::Decode,
        }
    }
}

/// Persisted session data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }
}

/// Session store
#[derive(Debug)]
pub struct SessionStore {
    storage: SessionStorage,
    session: Session,
}

impl SessionStore {
    /// Empty session over `storage`; nothing is read
    pub fn new(storage: SessionStorage) -> Self {
        Self {
            storage,
            session: Session::default(),
        }
    }

    /// Restore the session persisted in `storage`
    ///
    /// An unreadable file is treated as logged out.
    pub fn restore(storage: SessionStorage) -> Self {
        let session = match storage.load() {
            Ok(Some(session)) => {
                if let Some(user) = &session.user {
                    tracing::info!(username = %user.username, "Restored session");
                }
                session
            }
            Ok(None) => Session::default(),
            Err(e) => {
                tracing::warn!(path = %storage.path().display(), error = %e, "Ignoring unreadable session file");
                Session::default()
            }
        };
        Self { storage, session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn token(&self) -> Option<&str> {
        self.session.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.session.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn is_admin(&self) -> bool {
        self.session.is_admin()
    }

    pub fn storage(&self) -> &SessionStorage {
        &self.storage
    }

    /// Install the current token on `client`
    pub fn attach<C: HttpClient>(&self, client: &mut C) {
        client.set_token(self.session.token.clone());
    }

    /// Exchange credentials for a token, load the user and persist both
    ///
    /// On any failure the stored session, the in-memory session and the
    /// client's token are left as they were.
    pub async fn login<C: HttpClient>(
        &mut self,
        client: &mut C,
        credentials: &LoginRequest,
    ) -> Result<&User, SessionError> {
        let previous = client.token().map(str::to_string);

        let session = match Self::authenticate(client, credentials).await {
            Ok(session) => session,
            Err(e) => {
                client.set_token(previous);
                tracing::warn!(username = %credentials.username, error = %e, "Login failed");
                return Err(e.into());
            }
        };

        if let Err(e) = self.storage.save(&session) {
            client.set_token(previous);
            tracing::error!(path = %self.storage.path().display(), error = %e, "Failed to persist session");
            return Err(e.into());
        }

        self.session = session;
        let user = self.session.user.as_ref().ok_or_else(|| {
            ClientError::InvalidResponse("Session saved without a user".into())
        })?;
        tracing::info!(user_id = user.id, username = %user.username, "Logged in");
        Ok(user)
    }

    async fn authenticate<C: HttpClient>(
        client: &mut C,
        credentials: &LoginRequest,
    ) -> Result<Session, ClientError> {
        let issued = api::users::login(&*client, credentials).await?;
        let user_id = token::decode_subject(&issued.access_token)?;

        client.set_token(Some(issued.access_token.clone()));
        let user = api::users::get(&*client, user_id).await?;

        Ok(Session {
            token: Some(issued.access_token),
            user: Some(user),
        })
    }

    /// Forget the session everywhere
    ///
    /// Memory and the client are cleared even if the file cannot be removed.
    pub fn logout<C: HttpClient>(&mut self, client: &mut C) -> Result<(), SessionError> {
        if let Some(user) = &self.session.user {
            tracing::info!(username = %user.username, "Logged out");
        }
        self.session = Session::default();
        client.set_token(None);
        self.storage.delete()?;
        Ok(())
    }
}
