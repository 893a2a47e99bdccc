//! Per-session transcript state and the concurrent store of web sessions.

pub mod state;
pub mod store;

pub use state::SessionState;
pub use store::{SessionStore, SharedSession};
