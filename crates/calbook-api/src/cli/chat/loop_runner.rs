//! Main chat loop orchestration.
//!
//! Owns a single session for the lifetime of the terminal chat: probe the
//! backend, print the banner, then read lines until Ctrl+D or `/exit`.
//! Every non-command line goes through the same `ChatService::submit` the
//! web page uses.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use calbook_core::session::SessionState;
use calbook_types::chat::ChatRole;

use crate::state::AppState;

use super::banner::{print_welcome_banner, status_badge};
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::ChatRenderer;

fn thinking_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("  {spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Assistant is thinking...");
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Run the interactive chat loop until the user leaves.
pub async fn run_chat_loop(state: &AppState) -> anyhow::Result<()> {
    let mut session = SessionState::new();
    let session_id = session.id();
    let service = &state.chat_service;

    let status = service.status().await;
    print_welcome_banner(
        &state.config.page_title,
        service.backend_url(),
        status,
        &session_id,
    );
    if !status.is_connected() {
        println!(
            "  {} The backend is not reachable yet. Messages will fail until it is running.\n",
            style("!").yellow().bold()
        );
    }

    let renderer = ChatRenderer::new();
    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, _writer) = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        let text = match chat_input.read_line().await {
            InputEvent::Eof => break,
            InputEvent::Interrupted => {
                println!(
                    "\n  {}",
                    style("Press Ctrl+D to exit, or keep chatting.").dim()
                );
                continue;
            }
            InputEvent::Message(text) => text,
        };

        if text.trim().is_empty() {
            continue;
        }

        if let Some(cmd) = commands::parse(&text) {
            match cmd {
                ChatCommand::Help => commands::print_help(),
                ChatCommand::Clear => {
                    session.clear();
                    chat_input.clear();
                    println!("  {}\n", style("Chat cleared.").dim());
                }
                ChatCommand::Exit => break,
                ChatCommand::History => renderer.print_history(session.list()),
                ChatCommand::Status => {
                    let spinner = ProgressBar::new_spinner();
                    spinner.set_message("Checking backend...");
                    spinner.enable_steady_tick(Duration::from_millis(80));
                    let status = service.status().await;
                    spinner.finish_and_clear();
                    println!(
                        "\n  {}  {} ({})\n",
                        style("Backend:").bold(),
                        style(service.backend_url()).dim(),
                        status_badge(status)
                    );
                }
                ChatCommand::Session => {
                    println!(
                        "\n  {}  {}\n  {}  {}\n",
                        style("Session:").bold(),
                        session_id,
                        style("Started:").bold(),
                        session.started_at().format("%Y-%m-%d %H:%M:%S UTC"),
                    );
                }
                ChatCommand::Unknown(name) => {
                    println!(
                        "\n  {} Unknown command: {}. Type /help for available commands.\n",
                        style("?").yellow().bold(),
                        style(name).dim()
                    );
                }
            }
            continue;
        }

        chat_input.remember(&text);

        let spinner = thinking_spinner();
        let outcome = service.submit(&mut session, &text).await;
        spinner.finish_and_clear();

        // Blank input never reaches here, but keep the loop alive if it does.
        let Ok(outcome) = outcome else {
            continue;
        };

        match &outcome.reply {
            Ok(reply) => renderer.print_reply(reply),
            Err(e) => renderer.print_error(e),
        }
        renderer.print_footer(outcome.response_ms, session.len());
    }

    println!("\n  {}", style("Session ended.").dim());
    info!(
        session_id = %session_id,
        user_messages = session.count_role(ChatRole::User),
        assistant_messages = session.count_role(ChatRole::Assistant),
        "chat session ended"
    );

    Ok(())
}
