//! Embedded schema migrations.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{info, instrument};

use crate::db::DbError;

/// Migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Applies pending migrations to the database at `db_path`.
///
/// Returns the versions that were applied, oldest first.
///
/// # Errors
///
/// Returns [`DbError`] if the database cannot be opened or a migration fails.
#[instrument]
pub fn run_migrations(db_path: &str) -> Result<Vec<String>, DbError> {
    let mut conn = SqliteConnection::establish(db_path)
        .map_err(|e| DbError::new(format!("Failed to connect to '{}': {}", db_path, e)))?;

    let applied: Vec<String> = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| DbError::new(format!("Migration failed: {}", e)))?
        .into_iter()
        .map(|version| version.to_string())
        .collect();

    for version in &applied {
        info!(version = %version, "Applied migration");
    }
    info!(count = applied.len(), path = %db_path, "Database schema is current");
    Ok(applied)
}
