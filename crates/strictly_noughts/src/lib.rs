//! Strictly Noughts - pure noughts-and-crosses engine
//!
//! This crate holds the game core: the board model, the move engine that
//! validates client-submitted boards, and the adversarial search that picks
//! the automated opponent's reply. It performs no I/O.
//!
//! # Architecture
//!
//! - **Board**: 3x3 value type with win, fullness and diff queries
//! - **Engine**: validates a submitted transition and applies the reply
//! - **Strategy**: pluggable move policy (minimax with alpha-beta pruning)
//!
//! # Example
//!
//! ```
//! use strictly_noughts::{Board, Engine, Mark, Minimax, Position, Square};
//!
//! # fn example() -> Result<(), strictly_noughts::EngineError> {
//! let engine = Engine::new(Minimax::new());
//! let mut rng = rand::rng();
//!
//! let opening: Board = "X--------".parse()?;
//! let (engine_mark, board) = engine.start(opening, &mut rng)?;
//!
//! assert_eq!(engine_mark, Mark::Nought);
//! assert_eq!(board.get(Position::Center), Square::Occupied(Mark::Nought));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod engine;
mod error;
mod position;
pub mod rules;
mod strategy;
mod types;

pub use engine::Engine;
pub use error::{BoardError, EngineError};
pub use position::Position;
pub use strategy::{Minimax, Strategy};
pub use types::{Board, CROSS_GLYPH, EMPTY_GLYPH, Mark, NOUGHT_GLYPH, Square};
