//! Shared domain types for Calbook.
//!
//! This crate contains the types shared by every layer of the front-end:
//! chat turns, session identifiers, backend status, configuration, and the
//! error enums returned by the backend gateway.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod session;
pub mod status;
