//! Command-line interface for tictactoe.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tictactoe_web::StoreKind;

/// Tic-tac-toe with a persistent leaderboard
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Two-player tic-tac-toe over HTTP or in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Serve {
        #[command(flatten)]
        store: StoreArgs,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the leaderboard standings
    Leaderboard {
        #[command(flatten)]
        store: StoreArgs,
    },

    /// Play a match in this terminal
    Play {
        /// Name of the player using X
        #[arg(long)]
        player_x: String,

        /// Name of the player using O
        #[arg(long)]
        player_o: String,

        #[command(flatten)]
        store: StoreArgs,
    },
}

/// Config file and leaderboard selection, shared by every command
#[derive(Args, Debug, Default)]
pub struct StoreArgs {
    /// TOML config file; flags override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Leaderboard backend
    #[arg(long, value_enum)]
    pub store: Option<StoreKind>,

    /// Leaderboard file or database path
    #[arg(long)]
    pub leaderboard: Option<PathBuf>,
}
