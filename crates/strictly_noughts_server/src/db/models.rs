//! Row models for the `games` table.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use strictly_noughts::{Board, Mark};
use tracing::instrument;

use crate::db::{DbError, schema};
use crate::domain::{Game, GameId, GameStatus};

/// Stored game row, including soft-deleted ones.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::games)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GameRow {
    id: String,
    board: String,
    status: String,
    mark: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
    deleted_at: Option<NaiveDateTime>,
}

impl GameRow {
    /// Decodes the row into a [`Game`].
    #[instrument(skip(self), fields(id = %self.id))]
    pub fn into_game(self) -> Result<Game, DbError> {
        let id = GameId::parse(&self.id).map_err(|e| DbError::corrupt(&self.id, "id", e))?;
        let board = Board::parse(&self.board).map_err(|e| DbError::corrupt(&self.id, "board", e))?;
        let status = self
            .status
            .parse::<GameStatus>()
            .map_err(|e| DbError::corrupt(&self.id, "status", e))?;
        let engine_mark = decode_mark(&self.mark)
            .ok_or_else(|| DbError::corrupt(&self.id, "mark", format!("{:?}", self.mark)))?;
        Ok(Game::new(id, board, engine_mark, status))
    }
}

/// Insertable row for a new game.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::games)]
pub struct NewGameRow {
    id: String,
    board: String,
    status: String,
    mark: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl NewGameRow {
    /// Encodes a game created at `now`.
    pub fn from_game(game: &Game, now: NaiveDateTime) -> Self {
        Self::new(
            game.id().to_string(),
            game.board().serialize(),
            game.status().to_string(),
            encode_mark(*game.engine_mark()),
            now,
            now,
        )
    }
}

/// Mutable columns written after a move.
#[derive(Debug, Clone, AsChangeset, new)]
#[diesel(table_name = schema::games)]
pub struct GameChanges {
    board: String,
    status: String,
    mark: String,
    updated_at: NaiveDateTime,
}

impl GameChanges {
    /// Encodes the mutable state of `game` as of `now`.
    pub fn from_game(game: &Game, now: NaiveDateTime) -> Self {
        Self::new(
            game.board().serialize(),
            game.status().to_string(),
            encode_mark(*game.engine_mark()),
            now,
        )
    }
}

fn encode_mark(mark: Mark) -> String {
    mark.glyph().to_string()
}

fn decode_mark(s: &str) -> Option<Mark> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(glyph), None) => Mark::from_glyph(glyph),
        _ => None,
    }
}
