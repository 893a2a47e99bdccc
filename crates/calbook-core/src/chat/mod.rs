//! Chat orchestration: one user message in, one assistant turn out.

pub mod service;

pub use service::{ChatService, TurnOutcome};
