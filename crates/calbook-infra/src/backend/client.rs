//! HttpBackendGateway -- concrete [`BackendGateway`] over reqwest.
//!
//! Sends chat messages to `POST {base}/chat` and probes `GET {base}/health`.
//! Every failure is turned into a [`GatewayError`] or a [`BackendStatus`];
//! nothing is retried.

use std::time::{Duration, Instant};

use reqwest::StatusCode;

use calbook_core::gateway::BackendGateway;
use calbook_types::config::FrontendConfig;
use calbook_types::error::GatewayError;
use calbook_types::session::SessionId;
use calbook_types::status::BackendStatus;

use super::types::{ChatRequest, ChatResponse};

/// Booking backend client.
#[derive(Debug, Clone)]
pub struct HttpBackendGateway {
    client: reqwest::Client,
    base_url: String,
    chat_timeout: Duration,
    health_timeout: Duration,
}

impl HttpBackendGateway {
    /// Create a gateway for `base_url` (no trailing slash).
    pub fn new(
        base_url: impl Into<String>,
        chat_timeout: Duration,
        health_timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("calbook/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            chat_timeout,
            health_timeout,
        })
    }

    /// Create a gateway from a resolved configuration.
    pub fn from_config(config: &FrontendConfig) -> Result<Self, reqwest::Error> {
        Self::new(
            config.backend_url.clone(),
            config.chat_timeout(),
            config.health_timeout(),
        )
    }

    pub fn chat_timeout(&self) -> Duration {
        self.chat_timeout
    }

    pub fn health_timeout(&self) -> Duration {
        self.health_timeout
    }

    /// Build the full URL for a backend path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map a reqwest failure from the chat call.
    fn transport_error(&self, err: reqwest::Error) -> GatewayError {
        if err.is_timeout() {
            GatewayError::Timeout(self.chat_timeout.as_secs())
        } else {
            GatewayError::Connection(err.to_string())
        }
    }
}

impl BackendGateway for HttpBackendGateway {
    fn backend_url(&self) -> &str {
        &self.base_url
    }

    async fn send_message(
        &self,
        message: &str,
        session_id: &SessionId,
    ) -> Result<String, GatewayError> {
        let body = ChatRequest {
            message,
            session_id: session_id.to_string(),
        };
        let url = self.url("/chat");
        let start = Instant::now();

        let response = self
            .client
            .post(&url)
            .timeout(self.chat_timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        tracing::debug!(
            session_id = %session_id,
            status = status.as_u16(),
            latency_ms = start.elapsed().as_millis() as u64,
            "POST /chat"
        );

        if status != StatusCode::OK {
            let error_body = match response.text().await {
                Ok(text) => text,
                Err(e) => {
                    tracing::debug!(
                        session_id = %session_id,
                        status = status.as_u16(),
                        error = %e,
                        "failed to read error body"
                    );
                    String::new()
                }
            };
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body: error_body,
            });
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                GatewayError::Timeout(self.chat_timeout.as_secs())
            } else {
                GatewayError::InvalidResponse(e.to_string())
            }
        })?;

        Ok(parsed.response)
    }

    async fn probe(&self) -> BackendStatus {
        let url = self.url("/health");
        match self
            .client
            .get(&url)
            .timeout(self.health_timeout)
            .send()
            .await
        {
            Ok(response) if response.status() == StatusCode::OK => BackendStatus::Connected,
            Ok(response) => {
                let status = response.status().as_u16();
                tracing::debug!(status, "health probe returned non-OK status");
                BackendStatus::Error { status }
            }
            Err(err) => {
                tracing::debug!(error = %err, "health probe failed");
                BackendStatus::Offline
            }
        }
    }
}
