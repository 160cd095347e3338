//! Sprout CLI - houseplant care from the terminal

mod cli;
mod commands;
mod error;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let db_path = cli.db_path.as_deref();

    match cli.command {
        Commands::Add {
            name,
            species,
            water_every,
            feed_every,
        } => commands::run_add(&name, species, water_every, feed_every, db_path),
        Commands::List { json } => commands::run_list(json, db_path),
        Commands::Due { json } => commands::run_due(json, db_path),
        Commands::Done { id, kind } => commands::run_done(&id, kind.into(), db_path),
        Commands::Snooze { id, kind } => commands::run_snooze(&id, kind.into(), db_path),
        Commands::Sync { remote } => commands::run_sync(&remote, db_path).await,
        Commands::Watch { remote, interval } => {
            commands::run_watch(&remote, interval, db_path).await
        }
    }
}
