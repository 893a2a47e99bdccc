//! Application state wiring all services together.
//!
//! AppState holds the resolved configuration, the chat service bound to the
//! HTTP backend gateway, and the store of web sessions. It is shared by the
//! CLI commands and the web handlers.

use std::path::Path;
use std::sync::Arc;

use calbook_core::chat::ChatService;
use calbook_core::session::SessionStore;
use calbook_infra::backend::HttpBackendGateway;
use calbook_infra::config::{apply_backend_override, load_config, resolve_config_path};
use calbook_types::config::FrontendConfig;

/// Chat service pinned to the reqwest gateway.
pub type ConcreteChatService = ChatService<HttpBackendGateway>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<FrontendConfig>,
    pub chat_service: Arc<ConcreteChatService>,
    pub sessions: SessionStore,
}

impl AppState {
    /// Load configuration and wire services.
    ///
    /// `config_path` is `--config` / `CALBOOK_CONFIG`; `backend_url` is
    /// `--backend-url` / `BACKEND_URL` and overrides the file.
    pub async fn init(config_path: Option<&Path>, backend_url: Option<&str>) -> anyhow::Result<Self> {
        let file_config = match resolve_config_path(config_path) {
            Some(path) => load_config(&path).await,
            None => FrontendConfig::default(),
        };
        let config = apply_backend_override(file_config, backend_url)?;
        Self::from_config(config)
    }

    /// Wire services for an already-resolved configuration.
    pub fn from_config(config: FrontendConfig) -> anyhow::Result<Self> {
        let gateway = HttpBackendGateway::from_config(&config)?;
        tracing::info!(backend = %config.backend_url, "backend gateway ready");

        Ok(Self {
            config: Arc::new(config),
            chat_service: Arc::new(ChatService::new(gateway)),
            sessions: SessionStore::new(),
        })
    }
}
