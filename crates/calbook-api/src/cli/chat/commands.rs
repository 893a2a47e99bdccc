//! Slash command parsing for the chat loop.
//!
//! Commands start with `/` and control the local session; they are never
//! sent to the backend.

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq, Eq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Clear the transcript and the screen.
    Clear,
    /// Exit the chat session.
    Exit,
    /// Reprint the transcript.
    History,
    /// Probe the backend.
    Status,
    /// Show the session id sent to the backend.
    Session,
    /// Unknown command.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let cmd = trimmed
        .split_whitespace()
        .next()
        .unwrap_or(trimmed)
        .to_lowercase();

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/clear" | "/cls" | "/reset" => Some(ChatCommand::Clear),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        "/history" => Some(ChatCommand::History),
        "/status" | "/health" => Some(ChatCommand::Status),
        "/session" => Some(ChatCommand::Session),
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// Print the help text listing all available commands.
pub fn print_help() {
    let rows = [
        ("/help", "Show this help message"),
        ("/clear", "Clear the chat"),
        ("/history", "Show the conversation so far"),
        ("/status", "Check the backend connection"),
        ("/session", "Show the session id"),
        ("/exit", "End the chat"),
    ];

    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    for (name, description) in rows {
        println!("  {:<10} {}", style(name).cyan(), description);
    }
    println!();
    println!("  {}", style("Ctrl+D to exit").dim());
    println!();
}

/// Example requests shown on startup.
pub const EXAMPLE_REQUESTS: &[&str] = &[
    "What's available tomorrow?",
    "Book a meeting with John at 2 PM",
    "Schedule a doctor appointment for Friday",
    "Show me my events for today",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_help() {
        assert_eq!(parse("/help"), Some(ChatCommand::Help));
        assert_eq!(parse("/h"), Some(ChatCommand::Help));
        assert_eq!(parse("/?"), Some(ChatCommand::Help));
    }

    #[test]
    fn test_parse_exit() {
        assert_eq!(parse("/exit"), Some(ChatCommand::Exit));
        assert_eq!(parse("/QUIT"), Some(ChatCommand::Exit));
        assert_eq!(parse("/q"), Some(ChatCommand::Exit));
    }

    #[test]
    fn test_parse_clear() {
        assert_eq!(parse("/clear"), Some(ChatCommand::Clear));
        assert_eq!(parse("  /reset  "), Some(ChatCommand::Clear));
    }

    #[test]
    fn test_parse_status_and_session() {
        assert_eq!(parse("/status"), Some(ChatCommand::Status));
        assert_eq!(parse("/health"), Some(ChatCommand::Status));
        assert_eq!(parse("/session"), Some(ChatCommand::Session));
        assert_eq!(parse("/history now"), Some(ChatCommand::History));
    }

    #[test]
    fn test_parse_not_command() {
        assert_eq!(parse("book a meeting at 2/3"), None);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            parse("/book tomorrow"),
            Some(ChatCommand::Unknown("/book".to_string()))
        );
    }
}
