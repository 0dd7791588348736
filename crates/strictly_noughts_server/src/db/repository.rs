//! Game repository over SQLite.

use derive_more::{Display, Error, From};
use diesel::prelude::*;
use tracing::{debug, info, instrument, warn};

use crate::db::models::{GameChanges, GameRow, NewGameRow};
use crate::db::{DbError, schema};
use crate::domain::{Game, GameId};

/// Repository error.
#[derive(Debug, Clone, Display, Error, From)]
pub enum RepositoryError {
    /// No live game has the requested id.
    #[display("game not found")]
    NotFound,
    /// Storage failure.
    #[display("{}", _0)]
    #[from]
    Db(DbError),
}

impl From<diesel::result::Error> for RepositoryError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => RepositoryError::NotFound,
            other => RepositoryError::Db(DbError::from(other)),
        }
    }
}

/// Failure inside an update transaction: storage or the caller's closure.
enum TxError<E> {
    Repository(RepositoryError),
    Update(E),
}

impl<E> From<diesel::result::Error> for TxError<E> {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        TxError::Repository(err.into())
    }
}

/// Persists games, one connection per call.
///
/// Deleted games are kept with a deletion timestamp and hidden from every
/// read.
#[derive(Debug, Clone)]
pub struct GameRepository {
    db_path: String,
}

impl GameRepository {
    /// Busy timeout applied to every connection, in milliseconds.
    const BUSY_TIMEOUT_MS: u32 = 5_000;

    /// Creates a repository for the database at the given path.
    ///
    /// The schema must already be migrated; see
    /// [`run_migrations`](crate::run_migrations).
    #[instrument(skip(db_path))]
    pub fn new(db_path: impl Into<String>) -> Self {
        let db_path = db_path.into();
        info!(path = %db_path, "Creating GameRepository");
        Self { db_path }
    }

    /// Returns the database path.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        let mut conn = SqliteConnection::establish(&self.db_path)
            .map_err(|e| DbError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))?;
        diesel::sql_query(format!("PRAGMA busy_timeout = {}", Self::BUSY_TIMEOUT_MS))
            .execute(&mut conn)?;
        Ok(conn)
    }

    /// Lists live games, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Db`] on storage failure or a corrupt row.
    #[instrument(skip(self))]
    pub fn all(&self) -> Result<Vec<Game>, RepositoryError> {
        let mut conn = self.connection()?;

        let rows: Vec<GameRow> = schema::games::table
            .filter(schema::games::deleted_at.is_null())
            .order(schema::games::created_at.asc())
            .select(GameRow::as_select())
            .load(&mut conn)?;

        let games = rows
            .into_iter()
            .map(GameRow::into_game)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = games.len(), "Games loaded");
        Ok(games)
    }

    /// Loads a live game.
    ///
    /// # Errors
    ///
    /// - [`RepositoryError::NotFound`] if no live game has this id.
    /// - [`RepositoryError::Db`] on storage failure.
    #[instrument(skip(self), fields(id = %id))]
    pub fn get(&self, id: &GameId) -> Result<Game, RepositoryError> {
        let mut conn = self.connection()?;
        Self::load(&mut conn, id)
    }

    fn load(conn: &mut SqliteConnection, id: &GameId) -> Result<Game, RepositoryError> {
        let row: Option<GameRow> = schema::games::table
            .filter(schema::games::id.eq(id.as_str()))
            .filter(schema::games::deleted_at.is_null())
            .select(GameRow::as_select())
            .first(conn)
            .optional()?;

        match row {
            Some(row) => Ok(row.into_game()?),
            None => {
                debug!(id = %id, "Game not found");
                Err(RepositoryError::NotFound)
            }
        }
    }

    /// Inserts a new game.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Db`] on storage failure, including a
    /// duplicate id.
    #[instrument(skip(self, game), fields(id = %game.id(), status = %game.status()))]
    pub fn create(&self, game: &Game) -> Result<(), RepositoryError> {
        let mut conn = self.connection()?;
        let now = chrono::Utc::now().naive_utc();

        diesel::insert_into(schema::games::table)
            .values(&NewGameRow::from_game(game, now))
            .execute(&mut conn)?;

        info!(board = %game.board(), "Game created");
        Ok(())
    }

    /// Loads a game, lets `update` change it, and writes it back.
    ///
    /// The read and the write share one immediate transaction, so
    /// concurrent updates to the same game are serialized. Nothing is written
    /// when `update` fails.
    ///
    /// # Errors
    ///
    /// Returns the error of `update`, or a [`RepositoryError`] converted into
    /// `E`.
    #[instrument(skip(self, update), fields(id = %id))]
    pub fn update_with<F, E>(&self, id: &GameId, update: F) -> Result<Game, E>
    where
        F: FnOnce(&mut Game) -> Result<(), E>,
        E: From<RepositoryError>,
    {
        let mut conn = self.connection().map_err(RepositoryError::from)?;

        let result = conn.immediate_transaction::<_, TxError<E>, _>(|conn| {
            let mut game = Self::load(conn, id).map_err(TxError::Repository)?;
            update(&mut game).map_err(TxError::Update)?;

            let now = chrono::Utc::now().naive_utc();
            diesel::update(schema::games::table.filter(schema::games::id.eq(id.as_str())))
                .set(&GameChanges::from_game(&game, now))
                .execute(conn)?;
            Ok(game)
        });

        match result {
            Ok(game) => {
                info!(board = %game.board(), status = %game.status(), "Game updated");
                Ok(game)
            }
            Err(TxError::Repository(err)) => {
                warn!(error = %err, "Game update aborted");
                Err(err.into())
            }
            Err(TxError::Update(err)) => Err(err),
        }
    }

    /// Soft-deletes a live game.
    ///
    /// # Errors
    ///
    /// - [`RepositoryError::NotFound`] if no live game has this id.
    /// - [`RepositoryError::Db`] on storage failure.
    #[instrument(skip(self), fields(id = %id))]
    pub fn delete(&self, id: &GameId) -> Result<(), RepositoryError> {
        let mut conn = self.connection()?;
        let now = chrono::Utc::now().naive_utc();

        let affected = diesel::update(
            schema::games::table
                .filter(schema::games::id.eq(id.as_str()))
                .filter(schema::games::deleted_at.is_null()),
        )
        .set(schema::games::deleted_at.eq(Some(now)))
        .execute(&mut conn)?;

        if affected == 0 {
            debug!("Nothing to delete");
            return Err(RepositoryError::NotFound);
        }
        info!("Game deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_diesel_not_found_maps_to_not_found() {
        let err = RepositoryError::from(diesel::result::Error::NotFound);
        assert!(matches!(err, RepositoryError::NotFound));
        assert!(err.source().is_none());
    }

    #[test]
    fn test_db_error_is_source() {
        let err = RepositoryError::from(DbError::new("disk full"));
        assert!(matches!(err, RepositoryError::Db(_)));
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("Database error: disk full"));
    }
}
