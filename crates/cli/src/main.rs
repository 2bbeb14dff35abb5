//! Herald CLI
//!
//! Sends notification emails through the Herald plugins from the command line.

mod commands;
mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

/// Herald CLI: render and send notification emails.
#[derive(Parser, Debug)]
#[command(name = "herald", version, about)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, env = "HERALD_CONFIG", default_value = "herald.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Send a notification read from a JSON file.
    Send(commands::send::SendArgs),
    /// Print the JSON schema of the SMTP configuration.
    Schema,
    /// Check that the SMTP server accepts connections.
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Send(args) => commands::send::run(&cli.config, &args).await,
        Command::Schema => commands::schema::run(),
        Command::Check => commands::check::run(&cli.config).await,
    }
}
