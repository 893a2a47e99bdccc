//! Backend health status shown in the sidebar and the terminal banner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;

/// Result of probing the backend's `/health` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum BackendStatus {
    /// `/health` answered 200.
    Connected,
    /// `/health` answered with some other status code.
    Error { status: u16 },
    /// The probe failed at the transport level or timed out.
    Offline,
}

impl BackendStatus {
    /// Collapse to the boolean "is the backend usable" answer.
    pub fn is_connected(&self) -> bool {
        matches!(self, BackendStatus::Connected)
    }

    /// Sidebar text for this status.
    pub fn label(&self) -> &'static str {
        match self {
            BackendStatus::Connected => "Backend Connected",
            BackendStatus::Error { .. } => "Backend Error",
            BackendStatus::Offline => "Backend Offline",
        }
    }
}

impl fmt::Display for BackendStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendStatus::Connected => write!(f, "connected"),
            BackendStatus::Error { status } => write!(f, "error (HTTP {status})"),
            BackendStatus::Offline => write!(f, "offline"),
        }
    }
}

/// A timestamped status observation, as returned by the JSON API and
/// `calbook health --json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusReport {
    pub backend_url: String,
    pub status: BackendStatus,
    pub connected: bool,
    pub checked_at: DateTime<Utc>,
}

impl StatusReport {
    pub fn new(backend_url: impl Into<String>, status: BackendStatus) -> Self {
        Self {
            backend_url: backend_url.into(),
            status,
            connected: status.is_connected(),
            checked_at: Utc::now(),
        }
    }
}
