//! Abalone CLI - Command-line interface
//!
//! Commands:
//! - serve: Start the HTTP API and board UI server
//! - replay: Apply a recorded move list and print the final position

mod replay;
mod server;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "abalone")]
#[command(about = "Abalone move engine and game server")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the game server
    Serve(server::ServerArgs),
    /// Replay a recorded game
    Replay(replay::ReplayArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging, RUST_LOG overrides the default level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => server::run(args),
        Commands::Replay(args) => replay::run(args),
    }
}
