//! Session cookie extractor.
//!
//! Reads the `calbook_session` cookie from the `Cookie` header(s). A missing
//! or malformed cookie is not an error; the handler decides whether to start
//! a new session.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::HeaderValue;
use axum::response::Response;

use calbook_types::session::SessionId;

use crate::state::AppState;

/// Name of the cookie carrying the session id.
pub const SESSION_COOKIE: &str = "calbook_session";

/// The session id the browser presented, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionCookie(pub Option<SessionId>);

impl FromRequestParts<AppState> for SessionCookie {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(session_id_from_cookie_header);
        Ok(SessionCookie(id))
    }
}

/// Find and parse the session cookie in one `Cookie` header value.
fn session_id_from_cookie_header(header: &str) -> Option<SessionId> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| value.trim().parse().ok())
}

/// `Set-Cookie` value handing `id` to the browser.
pub fn session_cookie_value(id: &SessionId) -> String {
    format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax")
}

/// Attach the session cookie to `response` when the session is new.
pub fn with_session_cookie(mut response: Response, id: &SessionId, created: bool) -> Response {
    if created {
        match HeaderValue::from_str(&session_cookie_value(id)) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(e) => tracing::warn!(session_id = %id, error = %e, "invalid session cookie"),
        }
    }
    response
}
