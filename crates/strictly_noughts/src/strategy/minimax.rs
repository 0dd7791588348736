//! Exhaustive minimax search with alpha-beta pruning.

use super::Strategy;
use crate::{Board, Mark, Position, Square};
use tracing::{debug, instrument};

const WIN: i8 = 1;
const LOSS: i8 = -1;
const DRAW: i8 = 0;

/// Stand-ins for negative and positive infinity; every real score lies between.
const NEG_INF: i8 = i8::MIN;
const POS_INF: i8 = i8::MAX;

/// Minimax strategy.
///
/// Scores are relative to the mark being searched for (+1 win, -1 loss,
/// 0 draw), so the same search serves either side. The whole remaining game
/// tree is explored on every call; nothing is cached between calls.
///
/// Among equally scored moves the first in row-major order is returned,
/// which makes replies reproducible.
#[derive(Debug, Clone, Copy, Default)]
pub struct Minimax;

impl Minimax {
    /// Creates a minimax strategy.
    pub fn new() -> Self {
        Self
    }

    /// Scores `board` for `mark` with the given side to move.
    fn score(board: &mut Board, maximizing: bool, mark: Mark, mut alpha: i8, mut beta: i8) -> i8 {
        if let Some(winner) = board.winner() {
            return if winner == mark { WIN } else { LOSS };
        }
        if board.is_full() {
            return DRAW;
        }

        if maximizing {
            let mut best = NEG_INF;
            for pos in Position::ALL {
                if !board.is_empty(pos) {
                    continue;
                }
                let score = {
                    let mut trial = Trial::place(board, pos, mark);
                    Self::score(trial.board(), false, mark, alpha, beta)
                };
                best = best.max(score);
                alpha = alpha.max(score);
                if alpha >= beta {
                    return best;
                }
            }
            best
        } else {
            let mut best = POS_INF;
            for pos in Position::ALL {
                if !board.is_empty(pos) {
                    continue;
                }
                let score = {
                    let mut trial = Trial::place(board, pos, mark.opponent());
                    Self::score(trial.board(), true, mark, alpha, beta)
                };
                best = best.min(score);
                beta = beta.min(score);
                if alpha >= beta {
                    return best;
                }
            }
            best
        }
    }
}

impl Strategy for Minimax {
    #[instrument(skip(self, board), fields(board = %board, mark = ?mark))]
    fn best_move(&self, board: &Board, mark: Mark) -> Option<Position> {
        let mut scratch = *board;
        let mut best: Option<(Position, i8)> = None;

        for pos in Position::ALL {
            if !scratch.is_empty(pos) {
                continue;
            }
            let score = {
                let mut trial = Trial::place(&mut scratch, pos, mark);
                Self::score(trial.board(), false, mark, NEG_INF, POS_INF)
            };
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((pos, score));
            }
        }

        debug!(choice = ?best, "Search complete");
        best.map(|(pos, _)| pos)
    }
}

/// A trial move on the search buffer.
///
/// Placing the mark borrows the buffer; dropping the guard clears the square
/// again, so every return path out of a branch (including pruning) leaves
/// the buffer as it found it.
struct Trial<'a> {
    board: &'a mut Board,
    pos: Position,
}

impl<'a> Trial<'a> {
    fn place(board: &'a mut Board, pos: Position, mark: Mark) -> Self {
        debug_assert!(board.is_empty(pos));
        board.set(pos, Square::Occupied(mark));
        Self { board, pos }
    }

    fn board(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Trial<'_> {
    fn drop(&mut self) {
        self.board.set(self.pos, Square::Empty);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trial_restores_square() {
        let mut board = Board::parse("X--------").unwrap();
        {
            let mut trial = Trial::place(&mut board, Position::Center, Mark::Nought);
            assert_eq!(trial.board().get(Position::Center), Square::Occupied(Mark::Nought));
        }
        assert_eq!(board, Board::parse("X--------").unwrap());
    }

    #[test]
    fn test_score_terminal_positions() {
        let mut won = Board::parse("XXX00----").unwrap();
        assert_eq!(Minimax::score(&mut won, true, Mark::Cross, NEG_INF, POS_INF), WIN);
        assert_eq!(Minimax::score(&mut won, true, Mark::Nought, NEG_INF, POS_INF), LOSS);

        let mut drawn = Board::parse("X0X0XX0X0").unwrap();
        assert_eq!(Minimax::score(&mut drawn, true, Mark::Cross, NEG_INF, POS_INF), DRAW);
    }

    #[test]
    fn test_score_leaves_buffer_untouched() {
        let original = Board::parse("X0-------").unwrap();
        let mut buffer = original;
        Minimax::score(&mut buffer, true, Mark::Cross, NEG_INF, POS_INF);
        assert_eq!(buffer, original);
    }

    #[test]
    fn test_blank_board_opens_top_left() {
        // Every opening draws under perfect play; the first one wins the tie.
        let choice = Minimax::new().best_move(&Board::blank(), Mark::Cross);
        assert_eq!(choice, Some(Position::TopLeft));
    }

    #[test]
    fn test_full_board_has_no_move() {
        let board = Board::parse("X0X0XX0X0").unwrap();
        assert_eq!(Minimax::new().best_move(&board, Mark::Nought), None);
    }
}
