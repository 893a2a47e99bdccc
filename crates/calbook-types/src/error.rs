use thiserror::Error;

/// Failure of a single chat call to the backend.
///
/// The `Display` text is what ends up in the transcript as the assistant's
/// turn, so it stays close to what a user can act on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The backend answered with a non-success status code.
    #[error("Error: {status} - {body}")]
    Status { status: u16, body: String },

    /// The request never got a response (refused, DNS, reset, ...).
    #[error("Connection error: {0}. Please make sure the backend is running.")]
    Connection(String),

    /// No response within the chat timeout.
    #[error("Connection error: the backend did not respond within {0} seconds. Please make sure the backend is running.")]
    Timeout(u64),

    /// A 200 response whose body is not `{"response": string}`.
    #[error("Error: invalid response from backend: {0}")]
    InvalidResponse(String),
}

impl GatewayError {
    /// Short machine-readable kind, used in logs and the JSON API.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::Status { .. } => "status",
            GatewayError::Connection(_) => "connection",
            GatewayError::Timeout(_) => "timeout",
            GatewayError::InvalidResponse(_) => "invalid_response",
        }
    }

    /// Whether the backend was reachable at all.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, GatewayError::Connection(_) | GatewayError::Timeout(_))
    }
}

/// Errors from loading front-end configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {message}")]
    Read { path: String, message: String },

    #[error("failed to parse config file {path}: {message}")]
    Parse { path: String, message: String },

    #[error("invalid backend url '{0}'")]
    InvalidBackendUrl(String),
}

/// Rejected user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("message is empty")]
    Empty,
}
