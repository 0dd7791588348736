//! Move selection policies for the automated opponent.

mod minimax;

pub use minimax::Minimax;

use crate::{Board, Mark, Position};

/// Policy that picks a move for a mark on a board.
///
/// The engine depends only on this trait, so a different policy can be
/// swapped in without touching move validation.
pub trait Strategy {
    /// Returns the best empty position for `mark` on `board`.
    ///
    /// Returns `None` only when the board has no empty square. Implementations
    /// must not leave `board` changed.
    fn best_move(&self, board: &Board, mark: Mark) -> Option<Position>;
}

impl<S: Strategy + ?Sized> Strategy for &S {
    fn best_move(&self, board: &Board, mark: Mark) -> Option<Position> {
        (**self).best_move(board, mark)
    }
}

impl<S: Strategy + ?Sized> Strategy for Box<S> {
    fn best_move(&self, board: &Board, mark: Mark) -> Option<Position> {
        (**self).best_move(board, mark)
    }
}
