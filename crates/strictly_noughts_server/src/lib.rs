//! Strictly Noughts server - REST games service
//!
//! Serves noughts-and-crosses games against the minimax engine over HTTP
//! and keeps them in SQLite.
//!
//! # Architecture
//!
//! - **Domain**: game records, ids and statuses
//! - **Db**: diesel repository with embedded migrations
//! - **Service**: game lifecycle on top of engine and repository
//! - **Http**: axum routes under `/api/v1/games`
//! - **Config**: TOML file, environment and CLI layering
//!
//! # Example
//!
//! ```no_run
//! use strictly_noughts_server::{ServerConfig, run_migrations, serve};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ServerConfig::from_file("noughts.toml")?.with_env()?;
//! run_migrations(config.db_path())?;
//! serve(&config).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod db;
mod domain;
mod http;
mod service;

pub use config::{
    ConfigError, ConfigOverrides, ENV_DB_PATH, ENV_HOST, ENV_PORT, ENV_PUBLIC_URL, ENV_SEED,
    ServerConfig,
};
pub use db::{DbError, GameRepository, MIGRATIONS, RepositoryError, run_migrations};
pub use domain::{Game, GameId, GameIdError, GameStatus};
pub use http::{ApiError, AppState, DynStrategy, ErrorBody, GameBody, LocationBody, router, serve};
pub use service::{GameService, ServiceError};
