//! Core logic for Calbook.
//!
//! Holds the per-session transcript, the store that maps browser sessions to
//! transcripts, the `BackendGateway` port the infrastructure layer
//! implements, and the chat service tying them together. Depends only on
//! `calbook-types` -- never on `calbook-infra` or any HTTP crate.

pub mod chat;
pub mod gateway;
pub mod session;
