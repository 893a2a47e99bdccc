//! Front-end configuration loader.
//!
//! Reads an optional `config.toml` (by default `~/.calbook/config.toml`) and
//! deserializes it into [`FrontendConfig`]. Falls back to defaults when the
//! file is missing or malformed. The backend URL can then be overridden from
//! the command line or the `BACKEND_URL` environment variable.

use std::path::{Path, PathBuf};

use calbook_types::config::FrontendConfig;
use calbook_types::error::ConfigError;
use reqwest::Url;

/// Resolve which config file to read.
///
/// Priority:
/// 1. Explicit path (`--config` or `CALBOOK_CONFIG`)
/// 2. `~/.calbook/config.toml`
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    dirs::home_dir().map(|home| home.join(".calbook").join("config.toml"))
}

/// Load configuration from `path`.
///
/// - Missing file: defaults.
/// - Unreadable or unparsable file: logs a warning and returns defaults.
pub async fn load_config(path: &Path) -> FrontendConfig {
    match try_load_config(path).await {
        Ok(Some(config)) => config,
        Ok(None) => {
            tracing::debug!("No config file at {}, using defaults", path.display());
            FrontendConfig::default()
        }
        Err(err) => {
            tracing::warn!("{err}, using defaults");
            FrontendConfig::default()
        }
    }
}

/// Strict variant of [`load_config`]: `Ok(None)` when the file is missing,
/// an error when it exists but cannot be used.
pub async fn try_load_config(path: &Path) -> Result<Option<FrontendConfig>, ConfigError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(ConfigError::Read {
                path: path.display().to_string(),
                message: err.to_string(),
            });
        }
    };

    toml::from_str::<FrontendConfig>(&content)
        .map(Some)
        .map_err(|err| ConfigError::Parse {
            path: path.display().to_string(),
            message: err.to_string(),
        })
}

/// Apply a backend URL override and normalize the result.
///
/// `override_url` comes from `--backend-url` / `BACKEND_URL` and wins over
/// whatever the file said. Either way the URL must be absolute http(s);
/// trailing slashes are dropped so paths can be appended directly.
pub fn apply_backend_override(
    mut config: FrontendConfig,
    override_url: Option<&str>,
) -> Result<FrontendConfig, ConfigError> {
    if let Some(url) = override_url.map(str::trim).filter(|u| !u.is_empty()) {
        config.backend_url = url.to_string();
    }
    config.backend_url = normalize_backend_url(&config.backend_url)?;
    Ok(config)
}

/// Validate a backend base URL and strip trailing slashes.
pub fn normalize_backend_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed =
        Url::parse(trimmed).map_err(|_| ConfigError::InvalidBackendUrl(raw.to_string()))?;
    match parsed.scheme() {
        "http" | "https" if parsed.host_str().is_some() => Ok(trimmed.to_string()),
        _ => Err(ConfigError::InvalidBackendUrl(raw.to_string())),
    }
}
