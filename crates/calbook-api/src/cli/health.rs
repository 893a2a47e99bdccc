//! Backend health check command.

use anyhow::Result;
use console::style;

use calbook_types::status::{BackendStatus, StatusReport};

use crate::state::AppState;

/// Probe the backend once and print the result.
///
/// Returns whether the backend is connected so the caller can set the exit
/// code.
pub async fn health(state: &AppState, json: bool) -> Result<bool> {
    let status = state.chat_service.status().await;
    let report = StatusReport::new(state.chat_service.backend_url(), status);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(report.connected);
    }

    let mark = match status {
        BackendStatus::Connected => style("✓").green(),
        BackendStatus::Error { .. } => style("✗").red(),
        BackendStatus::Offline => style("✗").red(),
    };

    println!();
    println!("  {} {}", mark, style(status.label()).bold());
    println!(
        "  {}  {}",
        style("Backend:").dim(),
        style(&report.backend_url).cyan()
    );
    if let BackendStatus::Error { status } = status {
        println!("  {}   HTTP {}", style("Status:").dim(), status);
    }
    println!();

    Ok(report.connected)
}
