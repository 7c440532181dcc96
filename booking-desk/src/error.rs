//! Desk error types

use booking_client::{ClientError, SessionError};
use shared::ErrorKind;
use thiserror::Error;

use crate::views::Notice;

#[derive(Debug, Error)]
pub enum DeskError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Form input rejected before anything was sent
    #[error("{0}")]
    Invalid(String),

    /// A view reported a failure
    #[error("{}", .0.render())]
    View(Notice),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DeskError {
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::NotAuthenticated | Self::Forbidden(_) => Some(ErrorKind::Authorization),
            Self::Invalid(_) => Some(ErrorKind::Validation),
            Self::View(notice) => notice.kind,
            Self::Session(e) => Some(e.kind()),
            Self::Client(e) => Some(e.kind()),
            Self::Io(_) => None,
        }
    }
}

pub type DeskResult<T> = Result<T, DeskError>;
