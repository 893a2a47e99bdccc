//! BackendGateway trait definition.
//!
//! The port through which the front-end talks to the booking backend. Uses
//! native async fn in traits (RPITIT); the reqwest implementation lives in
//! `calbook-infra`.

use std::future::Future;

use calbook_types::error::GatewayError;
use calbook_types::session::SessionId;
use calbook_types::status::BackendStatus;

/// A client for the external booking backend.
///
/// One call per user action; implementations must not retry.
pub trait BackendGateway: Send + Sync {
    /// Base URL of the backend, for display.
    fn backend_url(&self) -> &str;

    /// Send one user message and wait for the assistant's reply text.
    fn send_message(
        &self,
        message: &str,
        session_id: &SessionId,
    ) -> impl Future<Output = Result<String, GatewayError>> + Send;

    /// Probe the backend's health endpoint.
    fn probe(&self) -> impl Future<Output = BackendStatus> + Send;

    /// `true` only when the probe reports [`BackendStatus::Connected`].
    fn health_check(&self) -> impl Future<Output = bool> + Send {
        async move { self.probe().await.is_connected() }
    }
}
