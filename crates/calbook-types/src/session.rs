//! Session identifiers.
//!
//! A [`SessionId`] is an opaque correlation token sent to the backend with
//! every chat message. It is generated once per session from a UUID v7, so
//! it is time-ordered and two sessions created in the same millisecond still
//! get distinct ids.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Number of characters shown in the short display form.
const SHORT_LEN: usize = 8;

/// Opaque identifier for one chat session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generate a fresh, time-based session id.
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// The first characters of the id, for status displays.
    pub fn short(&self) -> String {
        self.0.to_string()[..SHORT_LEN].to_string()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(SessionId)
            .map_err(|e| format!("invalid session id '{s}': {e}"))
    }
}
