//! HTTP client for the booking backend (`POST /chat`, `GET /health`).

pub mod client;
pub mod types;

pub use client::HttpBackendGateway;
