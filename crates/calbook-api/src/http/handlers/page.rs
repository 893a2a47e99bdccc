//! Browser-facing handlers: the chat page and its two forms.
//!
//! Endpoints:
//! - GET  /       - Render the chat page for this browser's session, if any
//! - POST /send   - Submit a message, then redirect to `/`
//! - POST /clear  - Clear the transcript, then redirect to `/`

use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;

use crate::http::extractors::session::{with_session_cookie, SessionCookie};
use crate::http::page::render_page;
use crate::state::AppState;

/// Body of the message form.
#[derive(Debug, Deserialize)]
pub struct SendForm {
    #[serde(default)]
    pub message: String,
}

/// GET / - Render the chat page.
///
/// Only looks the session up. A browser without a live session sees an empty
/// transcript; its session is created by the first `/send`.
pub async fn index(State(state): State<AppState>, SessionCookie(cookie): SessionCookie) -> Response {
    let status = state.chat_service.status().await;
    let title = &state.config.page_title;

    let html = match cookie.and_then(|id| state.sessions.get(&id)) {
        Some(session) => {
            let mut session = session.lock().await;
            session.touch();
            render_page(title, Some(&*session), status)
        }
        None => render_page(title, None, status),
    };

    Html(html).into_response()
}

/// POST /send - Submit the form's message and redirect back to the page.
///
/// The session lock is held until the backend answers, so a double submit
/// from the same browser queues behind the first.
pub async fn send(
    State(state): State<AppState>,
    SessionCookie(cookie): SessionCookie,
    Form(form): Form<SendForm>,
) -> Response {
    let (id, session, created) = state.sessions.get_or_create(cookie);

    {
        let mut session = session.lock().await;
        if let Err(e) = state.chat_service.submit(&mut session, &form.message).await {
            tracing::debug!(session_id = %id, reason = %e, "ignored message");
        }
    }

    with_session_cookie(Redirect::to("/").into_response(), &id, created)
}

/// POST /clear - Reset the transcript and redirect back to the page.
pub async fn clear(State(state): State<AppState>, SessionCookie(cookie): SessionCookie) -> Response {
    if let Some(session) = cookie.and_then(|id| state.sessions.get(&id)) {
        let mut session = session.lock().await;
        session.clear();
        tracing::debug!(session_id = %session.id(), "chat cleared");
    }
    Redirect::to("/").into_response()
}
