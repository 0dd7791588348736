//! SQLite persistence for games.

mod error;
mod migrate;
mod models;
mod repository;
mod schema;

pub use error::DbError;
pub use migrate::{MIGRATIONS, run_migrations};
pub use repository::{GameRepository, RepositoryError};
