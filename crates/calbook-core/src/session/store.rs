//! Concurrent store of live web sessions.
//!
//! Each browser gets its own [`SessionState`] behind an async mutex. The
//! mutex is held for a whole user/assistant exchange, which keeps a single
//! session's turns strictly alternating while different sessions proceed
//! independently.

use std::sync::Arc;
use std::time::Duration;

use calbook_types::session::SessionId;
use dashmap::DashMap;
use tokio::sync::Mutex;

use super::state::SessionState;

/// Handle to one session's state.
pub type SharedSession = Arc<Mutex<SessionState>>;

/// Map from session id to session state.
#[derive(Debug, Default, Clone)]
pub struct SessionStore {
    sessions: Arc<DashMap<SessionId, SharedSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create and register a brand-new session.
    pub fn create(&self) -> (SessionId, SharedSession) {
        let state = SessionState::new();
        let id = state.id();
        let shared = Arc::new(Mutex::new(state));
        self.sessions.insert(id, Arc::clone(&shared));
        tracing::debug!(session_id = %id, "session created");
        (id, shared)
    }

    pub fn get(&self, id: &SessionId) -> Option<SharedSession> {
        self.sessions.get(id).map(|entry| Arc::clone(entry.value()))
    }

    /// Look up `id` if given and still live, otherwise start a new session.
    ///
    /// The returned flag is `true` when a new session was created, so the
    /// caller knows to hand the new id back to the client.
    pub fn get_or_create(&self, id: Option<SessionId>) -> (SessionId, SharedSession, bool) {
        if let Some(id) = id {
            if let Some(shared) = self.get(&id) {
                return (id, shared, false);
            }
        }
        let (id, shared) = self.create();
        (id, shared, true)
    }

    pub fn remove(&self, id: &SessionId) -> bool {
        self.sessions.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Discard sessions idle for longer than `max_idle`.
    ///
    /// Sessions whose lock is currently held are in the middle of an
    /// exchange and are always kept. Returns the number of sessions removed.
    pub fn purge_idle(&self, max_idle: Duration) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|id, shared| match shared.try_lock() {
            Ok(state) => {
                let keep = state.idle_for() <= max_idle;
                if !keep {
                    tracing::debug!(session_id = %id, turns = state.len(), "session expired");
                }
                keep
            }
            Err(_) => true,
        });
        before.saturating_sub(self.sessions.len())
    }
}
