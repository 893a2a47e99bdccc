//! JSON body shared by every `/api/v1` route.
//!
//! A success carries `data`, a failure carries `errors`; both carry `meta`.
//! Related routes are listed under `_links`.

use std::collections::BTreeMap;
use std::time::Instant;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Stable, machine-readable reason for a failed API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No live session behind the request's cookie.
    SessionNotFound,
    #[serde(rename = "VALIDATION_ERROR")]
    Validation,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::SessionNotFound => "SESSION_NOT_FOUND",
            ErrorCode::Validation => "VALIDATION_ERROR",
        }
    }

    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::SessionNotFound => StatusCode::NOT_FOUND,
            ErrorCode::Validation => StatusCode::BAD_REQUEST,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub meta: Meta,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ErrorEntry>,
    #[serde(rename = "_links", skip_serializing_if = "BTreeMap::is_empty")]
    pub links: BTreeMap<&'static str, &'static str>,
}

#[derive(Debug, Serialize)]
pub struct Meta {
    pub request_id: Uuid,
    pub timestamp: DateTime<Utc>,
    /// Handler time; absent on failures rejected before any work.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct ErrorEntry {
    pub code: ErrorCode,
    pub message: String,
}

impl Meta {
    fn stamp(response_time_ms: Option<u64>) -> Self {
        Self {
            request_id: Uuid::now_v7(),
            timestamp: Utc::now(),
            response_time_ms,
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    /// Wrap `data`, timing the handler from `started`.
    pub fn success(data: T, started: Instant) -> Self {
        let elapsed = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        Self {
            data: Some(data),
            meta: Meta::stamp(Some(elapsed)),
            errors: Vec::new(),
            links: BTreeMap::new(),
        }
    }

    pub fn with_link(mut self, rel: &'static str, href: &'static str) -> Self {
        self.links.insert(rel, href);
        self
    }
}

impl ApiResponse<()> {
    pub fn failure(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            data: None,
            meta: Meta::stamp(None),
            errors: vec![ErrorEntry {
                code,
                message: message.into(),
            }],
            links: BTreeMap::new(),
        }
    }
}
