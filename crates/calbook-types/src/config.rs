//! Front-end configuration types.
//!
//! `FrontendConfig` represents the optional `config.toml` that points the
//! front-end at a backend and sets its timeouts. All fields have defaults, so
//! an empty (or missing) file is a valid configuration.

use serde::{Deserialize, Serialize};

use std::time::Duration;

/// Backend used when nothing else is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Top-level configuration for the front-end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontendConfig {
    /// Base URL of the booking backend (no trailing slash).
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Timeout for `POST /chat`, in seconds.
    #[serde(default = "default_chat_timeout_secs")]
    pub chat_timeout_secs: u64,

    /// Timeout for `GET /health`, in seconds.
    #[serde(default = "default_health_timeout_secs")]
    pub health_timeout_secs: u64,

    /// Web sessions idle for longer than this are discarded.
    #[serde(default = "default_session_idle_timeout_secs")]
    pub session_idle_timeout_secs: u64,

    /// Title shown in the page header and terminal banner.
    #[serde(default = "default_page_title")]
    pub page_title: String,
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

fn default_chat_timeout_secs() -> u64 {
    30
}

fn default_health_timeout_secs() -> u64 {
    5
}

fn default_session_idle_timeout_secs() -> u64 {
    3600
}

fn default_page_title() -> String {
    "Calendar Booking Agent".to_string()
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            chat_timeout_secs: default_chat_timeout_secs(),
            health_timeout_secs: default_health_timeout_secs(),
            session_idle_timeout_secs: default_session_idle_timeout_secs(),
            page_title: default_page_title(),
        }
    }
}

impl FrontendConfig {
    pub fn chat_timeout(&self) -> Duration {
        Duration::from_secs(self.chat_timeout_secs)
    }

    pub fn health_timeout(&self) -> Duration {
        Duration::from_secs(self.health_timeout_secs)
    }

    pub fn session_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.session_idle_timeout_secs)
    }
}
