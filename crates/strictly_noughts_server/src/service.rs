//! Game lifecycle on top of the engine and the repository.

use derive_more::{Display, Error};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::sync::Mutex;
use strictly_noughts::{Board, Engine, EngineError, Strategy};
use tracing::{error, info, instrument, warn};

use crate::db::{GameRepository, RepositoryError};
use crate::domain::{Game, GameId};

/// Service-level failure, already classified for the client.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ServiceError {
    /// The request cannot be honored as sent.
    #[display("{}", _0)]
    BadRequest(#[error(not(source))] String),
    /// No live game has the requested id.
    #[display("not found")]
    NotFound,
    /// Storage or engine failure. The detail stays in the logs.
    #[display("internal error: {}", _0)]
    Internal(#[error(not(source))] String),
}

impl From<EngineError> for ServiceError {
    fn from(err: EngineError) -> Self {
        if err.is_client_error() {
            ServiceError::BadRequest(err.to_string())
        } else {
            error!(error = %err, "Engine failure");
            ServiceError::Internal(err.to_string())
        }
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::Db(db) => {
                error!(error = %db, "Storage failure");
                ServiceError::Internal(db.to_string())
            }
        }
    }
}

/// Games service.
///
/// All methods block on SQLite and on the search; call them from a blocking
/// context.
#[derive(Debug)]
pub struct GameService<S> {
    repository: GameRepository,
    engine: Engine<S>,
    rng: Mutex<SmallRng>,
}

impl<S: Strategy> GameService<S> {
    /// Creates a service. `rng` decides the engine's mark on blank openings.
    pub fn new(repository: GameRepository, engine: Engine<S>, rng: SmallRng) -> Self {
        Self {
            repository,
            engine,
            rng: Mutex::new(rng),
        }
    }

    /// Returns the repository.
    pub fn repository(&self) -> &GameRepository {
        &self.repository
    }

    /// Splits off a generator for one request so the shared one is only
    /// locked briefly.
    fn fork_rng(&self) -> Result<SmallRng, ServiceError> {
        let mut shared = self
            .rng
            .lock()
            .map_err(|_| ServiceError::Internal("random source lock poisoned".to_string()))?;
        Ok(SmallRng::from_rng(&mut *shared))
    }

    /// Lists live games, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Internal`] on storage failure.
    #[instrument(skip(self))]
    pub fn all(&self) -> Result<Vec<Game>, ServiceError> {
        Ok(self.repository.all()?)
    }

    /// Loads a live game.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] for unknown or deleted ids.
    #[instrument(skip(self), fields(id = %id))]
    pub fn get(&self, id: &GameId) -> Result<Game, ServiceError> {
        Ok(self.repository.get(id)?)
    }

    /// Starts a game from the submitted opening and stores it.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::BadRequest`] if the opening holds more than one mark.
    /// - [`ServiceError::Internal`] on engine or storage failure.
    #[instrument(skip(self, submitted), fields(submitted = %submitted))]
    pub fn create(&self, submitted: Board) -> Result<Game, ServiceError> {
        let mut rng = self.fork_rng()?;
        let (engine_mark, board) = self.engine.start(submitted, &mut rng)?;

        let game = Game::started(GameId::generate(), board, engine_mark);
        self.repository.create(&game)?;

        info!(id = %game.id(), engine_mark = ?engine_mark, board = %board, "Game started");
        Ok(game)
    }

    /// Applies the human's move and the engine's reply.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::NotFound`] for unknown or deleted ids.
    /// - [`ServiceError::BadRequest`] if the game is over or the move is
    ///   illegal.
    /// - [`ServiceError::Internal`] on engine or storage failure.
    #[instrument(skip(self, submitted), fields(id = %id, submitted = %submitted))]
    pub fn update(&self, id: &GameId, submitted: Board) -> Result<Game, ServiceError> {
        self.repository.update_with(id, |game| {
            if !game.status().is_running() {
                warn!(status = %game.status(), "Move on finished game");
                return Err(ServiceError::BadRequest("game is already over".to_string()));
            }

            let board = self.engine.play(game.board(), submitted, *game.engine_mark())?;
            game.record(board);
            Ok(())
        })
    }

    /// Soft-deletes a game.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] for unknown or already deleted ids.
    #[instrument(skip(self), fields(id = %id))]
    pub fn delete(&self, id: &GameId) -> Result<(), ServiceError> {
        Ok(self.repository.delete(id)?)
    }
}
