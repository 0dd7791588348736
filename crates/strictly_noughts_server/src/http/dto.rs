//! JSON bodies.

use serde::{Deserialize, Serialize};

use crate::domain::Game;

/// Game as seen by clients. Requests may fill `board` only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameBody {
    /// Game id. Must be empty in requests.
    #[serde(default)]
    pub id: String,
    /// Nine-glyph board.
    #[serde(default)]
    pub board: String,
    /// Status name. Must be empty in requests.
    #[serde(default)]
    pub status: String,
}

impl From<&Game> for GameBody {
    fn from(game: &Game) -> Self {
        Self {
            id: game.id().to_string(),
            board: game.board().serialize(),
            status: game.status().to_string(),
        }
    }
}

/// Response to a successful create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationBody {
    /// URL of the new game.
    pub location: String,
}

/// Error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// What went wrong.
    pub reason: String,
}
