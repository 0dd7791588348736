//! Core domain types for noughts and crosses.

use crate::error::BoardError;
use crate::position::Position;
use crate::rules;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Glyph of an empty square in the serialized board.
pub const EMPTY_GLYPH: char = '-';

/// Glyph of a cross in the serialized board.
pub const CROSS_GLYPH: char = 'X';

/// Glyph of a nought in the serialized board (the digit zero).
pub const NOUGHT_GLYPH: char = '0';

/// Accepted on input as a nought; never emitted.
const NOUGHT_ALIAS: char = 'O';

/// Mark placed by a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
pub enum Mark {
    /// Cross (X).
    Cross,
    /// Nought (0).
    Nought,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::Cross => Mark::Nought,
            Mark::Nought => Mark::Cross,
        }
    }

    /// Returns the glyph used for this mark in the serialized board.
    pub fn glyph(self) -> char {
        match self {
            Mark::Cross => CROSS_GLYPH,
            Mark::Nought => NOUGHT_GLYPH,
        }
    }

    /// Parses a mark from its glyph.
    pub fn from_glyph(glyph: char) -> Option<Self> {
        match Square::from_glyph(glyph)? {
            Square::Occupied(mark) => Some(mark),
            Square::Empty => None,
        }
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a mark.
    Occupied(Mark),
}

impl Square {
    /// Returns the glyph used for this square in the serialized board.
    pub fn glyph(self) -> char {
        match self {
            Square::Empty => EMPTY_GLYPH,
            Square::Occupied(mark) => mark.glyph(),
        }
    }

    /// Parses a square from its glyph.
    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            EMPTY_GLYPH => Some(Square::Empty),
            CROSS_GLYPH => Some(Square::Occupied(Mark::Cross)),
            NOUGHT_GLYPH | NOUGHT_ALIAS => Some(Square::Occupied(Mark::Nought)),
            _ => None,
        }
    }
}

/// 3x3 noughts-and-crosses board.
///
/// Boards are plain values: two boards with the same squares are equal no
/// matter how they were reached. On the wire a board is nine glyphs in
/// row-major order, e.g. `"X-0------"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a board with every square empty.
    pub const fn blank() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Parses a board from its nine-glyph row-major form.
    ///
    /// The letter `O` is read as a nought, like `0`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError`] if the input is not exactly nine characters or
    /// contains a character other than `-`, `X`, `0` or `O`.
    #[instrument]
    pub fn parse(s: &str) -> Result<Self, BoardError> {
        let len = s.chars().count();
        if len != 9 {
            return Err(BoardError::InvalidLength { len });
        }

        let mut board = Self::blank();
        for (index, glyph) in s.chars().enumerate() {
            board.squares[index] =
                Square::from_glyph(glyph).ok_or(BoardError::InvalidGlyph { glyph, index })?;
        }
        Ok(board)
    }

    /// Serializes the board to its nine-glyph row-major form.
    pub fn serialize(&self) -> String {
        self.squares.iter().map(|square| square.glyph()).collect()
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Sets the square at the given position.
    pub fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.to_index()] = square;
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns all squares in row-major order.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Iterates the empty positions in row-major order.
    pub fn empty_positions(&self) -> impl Iterator<Item = Position> + '_ {
        Position::ALL.into_iter().filter(|pos| self.is_empty(*pos))
    }

    /// Counts occupied squares.
    pub fn mark_count(&self) -> usize {
        self.squares
            .iter()
            .filter(|square| **square != Square::Empty)
            .count()
    }

    /// Checks if every square is occupied.
    pub fn is_full(&self) -> bool {
        rules::is_full(self)
    }

    /// Returns the mark holding a complete line, if any.
    pub fn winner(&self) -> Option<Mark> {
        rules::check_winner(self)
    }

    /// Returns the positions where `self` and `other` differ, row-major.
    pub fn diff(&self, other: &Board) -> Vec<Position> {
        rules::diff(self, other)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::blank()
    }
}

impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Board {
    type Error = BoardError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Board> for String {
    fn from(board: Board) -> Self {
        board.serialize()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.serialize())
    }
}
