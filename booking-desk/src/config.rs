//! Desk configuration
//!
//! Every setting can come from a flag or from the environment; a `.env`
//! file in the working directory is loaded first.

use std::path::PathBuf;

use booking_client::{ClientConfig, SessionStorage};
use clap::Args;

#[derive(Debug, Clone, Args)]
pub struct DeskConfig {
    /// Booking backend base URL
    #[arg(long, env = "BOOKING_API_URL", default_value = "http://localhost:8000/api")]
    pub api_url: String,

    /// Where the session file lives
    #[arg(long, env = "BOOKING_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, env = "BOOKING_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Log level when RUST_LOG is unset
    #[arg(long, env = "BOOKING_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Also write daily log files here
    #[arg(long, env = "BOOKING_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

impl DeskConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            data_dir: None,
            timeout_secs: 30,
            log_level: "info".into(),
            log_dir: None,
        }
    }

    /// Configured data dir, else `<platform data dir>/booking-desk`
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("booking-desk")
        })
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api_url.clone()).with_timeout(self.timeout_secs)
    }

    pub fn session_storage(&self) -> SessionStorage {
        SessionStorage::in_dir(self.data_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_data_dir_wins() {
        let mut config = DeskConfig::new("http://example.test");
        config.data_dir = Some(PathBuf::from("/tmp/desk"));
        assert_eq!(
            config.session_storage().path(),
            PathBuf::from("/tmp/desk/session.json").as_path()
        );
        assert_eq!(config.client_config().timeout, 30);
        assert!(DeskConfig::new("x").data_dir().ends_with("booking-desk"));
    }
}
