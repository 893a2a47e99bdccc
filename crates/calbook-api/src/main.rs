//! Calbook CLI and web front-end entry point.
//!
//! Binary name: `calbook`
//!
//! Parses CLI arguments, sets up tracing, resolves configuration, then
//! dispatches to the terminal chat, the web server, or a one-shot command.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;
use tokio_util::sync::CancellationToken;

use calbook_observe::tracing_setup::{
    init_tracing, shutdown_tracing, verbosity_filter, TracingOptions,
};
use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(TracingOptions {
        default_filter: verbosity_filter(cli.verbose, cli.quiet),
        json: cli.log_json,
        enable_otel: cli.otel,
    })
    .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "calbook", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init(cli.config.as_deref(), cli.backend_url.as_deref()).await?;

    let result = run(cli, state).await;
    shutdown_tracing();

    match result {
        Ok(true) => Ok(()),
        Ok(false) => std::process::exit(1),
        Err(e) => Err(e),
    }
}

/// Run the selected command. Returns `false` when the process should exit
/// with a failure status without printing an error.
async fn run(cli: Cli, state: AppState) -> anyhow::Result<bool> {
    match cli.command {
        Commands::Chat => {
            cli::chat::loop_runner::run_chat_loop(&state).await?;
        }

        Commands::Health => {
            return cli::health::health(&state, cli.json).await;
        }

        Commands::Config => {
            cli::config::show_config(&state, cli.json)?;
        }

        Commands::Serve { port, host } => {
            serve(state, &host, port, cli.quiet).await?;
        }

        Commands::Completions { .. } => unreachable!("handled before state init"),
    }

    Ok(true)
}

async fn serve(state: AppState, host: &str, port: u16, quiet: bool) -> anyhow::Result<()> {
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    let max_idle = state.config.session_idle_timeout();
    let cancel = CancellationToken::new();
    let sweeper = http::sweeper::spawn_session_sweeper(
        state.sessions.clone(),
        max_idle,
        http::sweeper::sweep_interval(max_idle),
        cancel.clone(),
    );

    if !quiet {
        println!(
            "  {} {} listening on {}",
            console::style("📅").bold(),
            state.config.page_title,
            console::style(format!("http://{addr}")).cyan()
        );
        println!(
            "  {}  {}",
            console::style("Backend:").dim(),
            console::style(&state.config.backend_url).cyan()
        );
        println!("  {}", console::style("Press Ctrl+C to stop").dim());
    }
    tracing::info!(%addr, backend = %state.config.backend_url, "web front-end started");

    let router = http::router::build_router(state);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    cancel.cancel();
    let _ = sweeper.await;

    if !quiet {
        println!("\n  Server stopped.");
    }
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
