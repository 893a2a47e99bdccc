//! JSON API handlers.
//!
//! Endpoints:
//! - GET  /api/v1/session   - This browser's session id and transcript
//! - POST /api/v1/messages  - Submit a message and return the reply
//! - GET  /api/v1/status    - Backend status as seen by this front-end

use std::time::Instant;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use calbook_types::chat::ChatTurn;
use calbook_types::session::SessionId;
use calbook_types::status::StatusReport;

use crate::http::error::AppError;
use crate::http::extractors::session::{with_session_cookie, SessionCookie};
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Session as exposed by the API.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session_id: SessionId,
    pub started_at: DateTime<Utc>,
    pub turn_count: usize,
    pub turns: Vec<ChatTurn>,
}

/// Request body for POST /api/v1/messages.
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub message: String,
}

/// Result of one exchange.
#[derive(Debug, Serialize)]
pub struct MessageView {
    pub session_id: SessionId,
    /// Assistant text as stored in the transcript.
    pub reply: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<&'static str>,
    pub response_ms: u64,
}

/// GET /api/v1/session - Return the caller's session.
pub async fn get_session(
    State(state): State<AppState>,
    SessionCookie(cookie): SessionCookie,
) -> Result<Json<ApiResponse<SessionView>>, AppError> {
    let start = Instant::now();

    let session = cookie
        .and_then(|id| state.sessions.get(&id))
        .ok_or_else(|| AppError::NotFound("No active session".to_string()))?;

    let view = {
        let session = session.lock().await;
        SessionView {
            session_id: session.id(),
            started_at: session.started_at(),
            turn_count: session.len(),
            turns: session.list().to_vec(),
        }
    };

    let resp = ApiResponse::success(view, start).with_link("self", "/api/v1/session");
    Ok(Json(resp))
}

/// POST /api/v1/messages - Submit a message for the caller's session.
pub async fn post_message(
    State(state): State<AppState>,
    SessionCookie(cookie): SessionCookie,
    Json(body): Json<MessageRequest>,
) -> Result<Response, AppError> {
    let start = Instant::now();
    let (id, session, created) = state.sessions.get_or_create(cookie);

    let outcome = {
        let mut session = session.lock().await;
        state.chat_service.submit(&mut session, &body.message).await?
    };

    let view = MessageView {
        session_id: id,
        reply: outcome.display_text(),
        success: outcome.is_success(),
        error_kind: outcome.reply.as_ref().err().map(|e| e.kind()),
        response_ms: outcome.response_ms,
    };

    let resp = ApiResponse::success(view, start).with_link("session", "/api/v1/session");
    Ok(with_session_cookie(Json(resp).into_response(), &id, created))
}

/// GET /api/v1/status - Probe the backend.
pub async fn get_status(State(state): State<AppState>) -> Json<ApiResponse<StatusReport>> {
    let start = Instant::now();
    let status = state.chat_service.status().await;
    let report = StatusReport::new(state.chat_service.backend_url(), status);
    Json(ApiResponse::success(report, start).with_link("self", "/api/v1/status"))
}
