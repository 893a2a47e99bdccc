//! Infrastructure layer for Calbook.
//!
//! Contains the reqwest implementation of the `BackendGateway` port defined
//! in `calbook-core` and the loader for the optional `config.toml`.

pub mod backend;
pub mod config;
