//! CLI command definitions for the `calbook` binary.
//!
//! Uses clap derive macros for argument parsing. Global flags control output
//! format, logging, and which backend to talk to.

pub mod chat;
pub mod config;
pub mod health;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Chat with the calendar booking assistant from a browser or a terminal.
#[derive(Parser)]
#[command(name = "calbook", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    /// Path to config.toml (default: ~/.calbook/config.toml).
    #[arg(long, global = true, env = "CALBOOK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Base URL of the booking backend (overrides the config file).
    #[arg(long, global = true, env = "BACKEND_URL")]
    pub backend_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the web chat page.
    Serve {
        /// Port to listen on.
        #[arg(long, short, default_value_t = 8501)]
        port: u16,

        /// Address to bind.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Chat with the assistant in this terminal.
    Chat,

    /// Check whether the backend is reachable.
    Health,

    /// Show the effective configuration.
    Config,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
