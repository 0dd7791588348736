//! Command-line interface for strictly_noughts_server.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use strictly_noughts_server::ConfigOverrides;

/// Strictly Noughts - noughts-and-crosses game service
#[derive(Parser, Debug)]
#[command(name = "strictly_noughts_server")]
#[command(about = "Play noughts and crosses against a minimax engine over HTTP", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server (applies pending migrations first)
    Serve(ConfigArgs),

    /// Apply pending database migrations and exit
    Migrate(ConfigArgs),
}

/// Configuration flags shared by all commands.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Path to the database file (created if it doesn't exist)
    #[arg(long)]
    pub db_path: Option<String>,

    /// Base URL used in Location headers
    #[arg(long)]
    pub public_url: Option<String>,

    /// Seed for the engine's coin flip on blank openings
    #[arg(long)]
    pub seed: Option<u64>,
}

impl ConfigArgs {
    /// Splits off the overriding values.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides::new(
            self.host.clone(),
            self.port,
            self.db_path.clone(),
            self.public_url.clone(),
            self.seed,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_serve_flags_parse() {
        let cli = Cli::parse_from([
            "strictly_noughts_server",
            "serve",
            "--port",
            "9000",
            "--db-path",
            "games.db",
            "--seed",
            "4",
        ]);
        let Command::Serve(args) = cli.command else {
            panic!("Expected serve");
        };
        let overrides = args.overrides();
        assert_eq!(overrides.port, Some(9000));
        assert_eq!(overrides.db_path.as_deref(), Some("games.db"));
        assert_eq!(overrides.seed, Some(4));
        assert_eq!(overrides.host, None);
    }

    #[test]
    fn test_migrate_takes_config() {
        let cli = Cli::parse_from(["strictly_noughts_server", "migrate", "--config", "n.toml"]);
        let Command::Migrate(args) = cli.command else {
            panic!("Expected migrate");
        };
        assert_eq!(args.config, Some(PathBuf::from("n.toml")));
    }
}
