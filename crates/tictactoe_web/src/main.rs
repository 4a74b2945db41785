//! Tic-tac-toe - Unified CLI
//!
//! HTTP server, leaderboard viewer, and terminal game in one binary.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, StoreArgs};
use tictactoe_engine::GameSession;
use tictactoe_web::{AppState, ServerConfig, SessionManager, router};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { store, host, port } => {
            init_tracing("info,tictactoe_web=debug,tictactoe_engine=info");
            let mut config = resolve_config(store)?;
            if let Some(host) = host {
                config = config.with_host(host);
            }
            if let Some(port) = port {
                config = config.with_port(port);
            }
            run_http_server(config).await
        }
        Command::Leaderboard { store } => {
            init_tracing("warn");
            show_leaderboard(&resolve_config(store)?)
        }
        Command::Play {
            player_x,
            player_o,
            store,
        } => {
            init_tracing("warn");
            run_terminal(&player_x, &player_o, &resolve_config(store)?)
        }
    }
}

fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Layers CLI flags over the config file (or defaults).
#[instrument]
fn resolve_config(args: StoreArgs) -> Result<ServerConfig> {
    let mut config = ServerConfig::load(args.config.as_deref())?;
    if let Some(store) = args.store {
        config = config.with_store(store);
    }
    if let Some(leaderboard) = args.leaderboard {
        config = config.with_leaderboard_path(leaderboard);
    }
    Ok(config)
}

/// Run the HTTP game server
#[instrument(skip_all, fields(addr = %config.bind_addr()))]
async fn run_http_server(config: ServerConfig) -> Result<()> {
    let store = config.open_store()?;
    let sessions = SessionManager::with_idle_ttl(config.session_idle_ttl());
    let sweeper = sessions.spawn_sweeper();
    let state = AppState::new(sessions, store);

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr()))?;
    info!(
        store = ?config.store(),
        leaderboard = %config.leaderboard_path().display(),
        "Server ready at http://{}/",
        config.bind_addr()
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutdown requested");
        })
        .await?;

    sweeper.abort();
    info!("Server stopped");
    Ok(())
}

/// Print the standings table
fn show_leaderboard(config: &ServerConfig) -> Result<()> {
    let store = config.open_store()?;
    let leaderboard = store
        .load_strict()
        .with_context(|| format!("Failed to read {}", config.leaderboard_path().display()))?;
    if leaderboard.is_empty() {
        println!("No games recorded yet.");
    } else {
        print!("{}", leaderboard.render_table());
    }
    Ok(())
}

/// Run a match on stdin/stdout
fn run_terminal(player_x: &str, player_o: &str, config: &ServerConfig) -> Result<()> {
    let mut session = GameSession::new(player_x, player_o)?;
    let store = config.open_store()?;
    tictactoe_web::play(&mut session, store.as_ref(), std::io::stdin().lock(), std::io::stdout())?;

    let leaderboard = store.load();
    for name in [player_x.trim(), player_o.trim()] {
        if let Some(entry) = leaderboard.get(name) {
            println!(
                "{}: {} won, {} lost, {} drawn",
                entry.player_name(),
                entry.wins(),
                entry.losses(),
                entry.draws()
            );
        }
    }
    Ok(())
}
