//! Interactive terminal chat with the booking assistant.
//!
//! Implements the chat loop: welcome banner with backend status, a thinking
//! spinner while the backend is working, markdown rendering of replies, and
//! slash commands. Entry point: `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
