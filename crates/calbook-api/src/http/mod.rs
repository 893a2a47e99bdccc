//! Web surface for the booking assistant.
//!
//! An axum app that serves the chat page at `/`, form endpoints that submit
//! and clear, and a small JSON API at `/api/v1/` using the envelope format.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod page;
pub mod response;
pub mod router;
pub mod sweeper;
