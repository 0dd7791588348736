//! Game records owned by the service.

use derive_getters::Getters;
use derive_more::Display;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strictly_noughts::{Board, Mark};
use tracing::instrument;

/// Opaque game identifier: 32 lowercase hex digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GameId(String);

impl GameId {
    /// Generates a fresh identifier from 128 random bits.
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::rng())
    }

    /// Generates an identifier from the given source.
    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let bits: u128 = rng.random();
        Self(format!("{bits:032x}"))
    }

    /// Parses an identifier.
    ///
    /// # Errors
    ///
    /// Returns [`GameIdError`] unless the input is 32 lowercase hex digits.
    #[instrument]
    pub fn parse(s: &str) -> Result<Self, GameIdError> {
        let valid = s.len() == 32 && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
        if valid {
            Ok(Self(s.to_string()))
        } else {
            Err(GameIdError {
                input: s.to_string(),
            })
        }
    }

    /// Returns the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for GameId {
    type Err = GameIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for GameId {
    type Error = GameIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<GameId> for String {
    fn from(id: GameId) -> Self {
        id.0
    }
}

/// Error for a malformed game identifier.
#[derive(Debug, Clone, PartialEq, Eq, Display, derive_more::Error)]
#[display("invalid game id: {:?}", input)]
pub struct GameIdError {
    /// Rejected input.
    pub input: String,
}

/// Game status. Anything but `Running` is final.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum GameStatus {
    /// Moves are still accepted.
    #[serde(rename = "RUNNING")]
    #[strum(serialize = "RUNNING")]
    Running,
    /// Cross completed a line.
    #[serde(rename = "X_WON")]
    #[strum(serialize = "X_WON")]
    CrossWon,
    /// Nought completed a line.
    #[serde(rename = "O_WON")]
    #[strum(serialize = "O_WON")]
    NoughtWon,
    /// The board filled up without a line.
    #[serde(rename = "DRAW")]
    #[strum(serialize = "DRAW")]
    Draw,
}

impl GameStatus {
    /// Derives the status of a board.
    pub fn of(board: &Board) -> Self {
        match board.winner() {
            Some(Mark::Cross) => GameStatus::CrossWon,
            Some(Mark::Nought) => GameStatus::NoughtWon,
            None if board.is_full() => GameStatus::Draw,
            None => GameStatus::Running,
        }
    }

    /// Returns true while the game accepts moves.
    pub fn is_running(self) -> bool {
        self == GameStatus::Running
    }
}

/// A game between a human and the engine.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Game {
    /// Identifier.
    id: GameId,
    /// Current board.
    board: Board,
    /// Mark played by the engine, fixed at creation.
    engine_mark: Mark,
    /// Current status.
    status: GameStatus,
}

impl Game {
    /// Creates a game record.
    pub fn new(id: GameId, board: Board, engine_mark: Mark, status: GameStatus) -> Self {
        Self {
            id,
            board,
            engine_mark,
            status,
        }
    }

    /// Creates a running game from the engine's opening.
    pub fn started(id: GameId, board: Board, engine_mark: Mark) -> Self {
        Self::new(id, board, engine_mark, GameStatus::Running)
    }

    /// Replaces the board and re-derives the status.
    pub fn record(&mut self, board: Board) {
        self.board = board;
        self.status = GameStatus::of(&board);
    }
}
