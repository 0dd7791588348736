//! Strictly Noughts - game service CLI

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command, ConfigArgs};
use strictly_noughts_server::{ServerConfig, run_migrations, serve};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info,strictly_noughts=debug,strictly_noughts_server=debug";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve(args) => run_server(args).await,
        Command::Migrate(args) => run_migrate(args),
    }
}

/// Resolves configuration: defaults, file, environment, flags.
#[instrument(skip(args))]
fn load_config(args: &ConfigArgs) -> Result<ServerConfig> {
    let config = match &args.config {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };
    Ok(config.with_env()?.with_overrides(args.overrides()))
}

/// Migrates the database and serves the API.
async fn run_server(args: ConfigArgs) -> Result<()> {
    let config = load_config(&args)?;
    info!(db_path = %config.db_path(), "Starting Strictly Noughts server");

    run_migrations(config.db_path())?;
    serve(&config).await
}

/// Migrates the database.
fn run_migrate(args: ConfigArgs) -> Result<()> {
    let config = load_config(&args)?;
    let applied = run_migrations(config.db_path())?;
    info!(count = applied.len(), "Migrations complete");
    Ok(())
}
