//! Sales call assistant entry point.
//!
//! Binary name: `salescall`
//!
//! Parses CLI arguments, loads configuration, wires services, then runs the
//! requested command or starts the web server.

mod cli;
mod http;
mod state;
mod turn;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use salescall_core::chat::store::SessionStore;
use salescall_infra::config::{load_config, resolve_config_path};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pick up GROQ_API_KEY and friends before anything reads the environment.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn,salescall=info",
        1 => "info,salescall=debug,salescall_core=debug,salescall_infra=debug",
        _ => "trace",
    };
    salescall_observe::tracing_setup::init_tracing(filter, cli.log_json, cli.otel)
        .map_err(|e| anyhow::anyhow!(e))?;

    let config_path = resolve_config_path(cli.config.as_deref());
    let config = load_config(config_path.as_deref()).await;

    let result = run(cli, config).await;
    salescall_observe::tracing_setup::shutdown_tracing();
    result
}

async fn run(cli: Cli, config: salescall_types::config::AppConfig) -> anyhow::Result<()> {
    match cli.command {
        Commands::Options => cli::options::print_options(&config.catalog, cli.json),

        Commands::Check => cli::check::check(&config, cli.json).await,

        Commands::Ask(args) => {
            let state = AppState::init(config)?;
            cli::ask::ask(&state, args, cli.json, cli.quiet).await
        }

        Commands::Serve { port, host } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let state = AppState::init(config)?;

            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!(%addr, "listening");

            if !cli.quiet {
                println!(
                    "  {} Sales call assistant on {}",
                    console::style("⚡").bold(),
                    console::style(format!("http://{addr}")).cyan()
                );
                if state.speech.is_none() {
                    println!(
                        "  {}",
                        console::style("Speech features disabled ([speech] enabled = false)").yellow()
                    );
                }
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }

            let sweeper = spawn_session_sweeper(Arc::clone(&state.sessions));
            let router = http::router::build_router(state);
            let served = axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await;
            sweeper.abort();
            served?;

            if !cli.quiet {
                println!("\n  Server stopped.");
            }
            Ok(())
        }
    }
}

/// Evict idle sessions on a timer while the server runs.
fn spawn_session_sweeper(sessions: Arc<SessionStore>) -> tokio::task::JoinHandle<()> {
    let period = (sessions.limits().idle_timeout / 4).max(Duration::from_secs(30));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            sessions.evict_idle();
        }
    })
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
