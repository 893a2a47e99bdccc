//! Chat service: the submit loop shared by the web page and the terminal.
//!
//! `submit` appends the user's turn, awaits the backend, and appends the
//! assistant's turn. A failed backend call still produces an assistant turn
//! (the error's display text) so the transcript keeps alternating, but the
//! caller also gets the structured result to branch on.

use std::time::Instant;

use calbook_types::chat::ChatTurn;
use calbook_types::error::{GatewayError, InputError};
use calbook_types::status::BackendStatus;

use crate::gateway::BackendGateway;
use crate::session::SessionState;

/// What happened to one submitted message.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// The backend's reply, or why there is none.
    pub reply: Result<String, GatewayError>,
    /// Wall-clock time spent waiting for the backend.
    pub response_ms: u64,
}

impl TurnOutcome {
    pub fn is_success(&self) -> bool {
        self.reply.is_ok()
    }

    /// The text that was appended as the assistant's turn.
    pub fn display_text(&self) -> String {
        match &self.reply {
            Ok(text) => text.clone(),
            Err(e) => e.to_string(),
        }
    }
}

/// Drives one exchange at a time against a [`BackendGateway`].
pub struct ChatService<G> {
    gateway: G,
}

impl<G: BackendGateway> ChatService<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn backend_url(&self) -> &str {
        self.gateway.backend_url()
    }

    /// Submit `text` on behalf of the session's user.
    ///
    /// Blank input is rejected and leaves the transcript untouched.
    /// Anything else is stored and sent exactly as typed, and exactly two
    /// turns are appended: the user's, then the assistant's.
    pub async fn submit(
        &self,
        session: &mut SessionState,
        text: &str,
    ) -> Result<TurnOutcome, InputError> {
        if text.trim().is_empty() {
            return Err(InputError::Empty);
        }

        let session_id = session.id();
        session.append(ChatTurn::user(text));

        let start = Instant::now();
        let reply = self.gateway.send_message(text, &session_id).await;
        let response_ms = start.elapsed().as_millis() as u64;

        match &reply {
            Ok(_) => {
                tracing::debug!(session_id = %session_id, response_ms, "backend replied");
            }
            Err(e) => {
                tracing::warn!(
                    session_id = %session_id,
                    kind = e.kind(),
                    response_ms,
                    error = %e,
                    "backend call failed"
                );
            }
        }

        let outcome = TurnOutcome { reply, response_ms };
        session.append(ChatTurn::assistant(outcome.display_text()));
        Ok(outcome)
    }

    /// Current backend status, for the sidebar or banner.
    pub async fn status(&self) -> BackendStatus {
        self.gateway.probe().await
    }

    pub async fn health_check(&self) -> bool {
        self.gateway.health_check().await
    }
}
