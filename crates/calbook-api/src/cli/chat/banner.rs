//! Welcome banner printed when a terminal chat starts.

use console::style;

use calbook_types::session::SessionId;
use calbook_types::status::BackendStatus;

use super::commands::EXAMPLE_REQUESTS;

/// Print the welcome banner at the start of a chat session.
///
/// Shows the page title, a short welcome, the backend and its status, the
/// short session id, and a few example requests.
pub fn print_welcome_banner(
    title: &str,
    backend_url: &str,
    status: BackendStatus,
    session_id: &SessionId,
) {
    println!();
    println!("  {}", style(title).cyan().bold());
    println!(
        "  {}",
        style(
            "Welcome! I'm your AI assistant for booking appointments. I can help you \
             check availability and schedule meetings on your Google Calendar."
        )
        .dim()
    );
    println!();
    println!(
        "  {}  {} ({})",
        style("Backend:").bold(),
        style(backend_url).dim(),
        status_badge(status)
    );
    println!(
        "  {}  {}...",
        style("Session:").bold(),
        style(session_id.short()).dim()
    );
    println!();
    println!("  {}", style("Example requests:").bold());
    for example in EXAMPLE_REQUESTS {
        println!("    {} \"{}\"", style("-").dim(), example);
    }
    println!();
    println!(
        "  {}",
        style("Type /help for commands, Ctrl+D to exit").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}

/// Coloured one-word status for the banner and `/status`.
pub fn status_badge(status: BackendStatus) -> String {
    match status {
        BackendStatus::Connected => style(status.label()).green().to_string(),
        BackendStatus::Error { .. } => style(status.label()).red().to_string(),
        BackendStatus::Offline => style(status.label()).red().to_string(),
    }
}
