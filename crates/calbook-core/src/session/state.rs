//! Transcript state for a single chat session.
//!
//! Wraps the ordered list of turns together with the session id that is sent
//! to the backend, plus the timestamps the store uses for idle expiry.

use std::time::{Duration, Instant};

use calbook_types::chat::{ChatRole, ChatTurn};
use calbook_types::session::SessionId;
use chrono::{DateTime, Utc};

/// The state owned by one session: its id and its transcript.
///
/// Turns are kept in insertion order, which is also display order. The
/// transcript grows without bound until [`SessionState::clear`] is called.
#[derive(Debug, Clone)]
pub struct SessionState {
    id: SessionId,
    turns: Vec<ChatTurn>,
    started_at: DateTime<Utc>,
    last_active: Instant,
}

impl SessionState {
    /// Start a new session with a freshly generated id.
    pub fn new() -> Self {
        Self::with_id(SessionId::generate())
    }

    /// Start a new, empty session under an existing id.
    pub fn with_id(id: SessionId) -> Self {
        Self {
            id,
            turns: Vec::new(),
            started_at: Utc::now(),
            last_active: Instant::now(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Append a turn to the end of the transcript.
    pub fn append(&mut self, turn: ChatTurn) {
        self.turns.push(turn);
        self.touch();
    }

    /// Drop every turn. The session id is kept.
    pub fn clear(&mut self) {
        self.turns.clear();
        self.touch();
    }

    /// The transcript in display order.
    pub fn list(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Number of turns authored by `role`.
    pub fn count_role(&self, role: ChatRole) -> usize {
        self.turns.iter().filter(|t| t.role() == role).count()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn last_active(&self) -> Instant {
        self.last_active
    }

    /// How long since the session was last read or written.
    pub fn idle_for(&self) -> Duration {
        self.last_active.elapsed()
    }

    /// Mark the session as in use without changing the transcript.
    pub fn touch(&mut self) {
        self.last_active = Instant::now();
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
