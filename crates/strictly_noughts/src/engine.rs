//! Move engine: validates client-submitted boards and applies the reply.

use crate::{Board, EngineError, Mark, Position, Square, Strategy};
use rand::Rng;
use tracing::{debug, error, instrument};

const INVALID_DIFF: &str = "invalid board diff";

/// Stateless move engine.
///
/// The engine never stores anything: each call is a function of the boards
/// it is given and the injected [`Strategy`]. It is `Send + Sync` whenever
/// the strategy is, so one instance can serve concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct Engine<S> {
    strategy: S,
}

impl<S: Strategy> Engine<S> {
    /// Creates an engine backed by the given strategy.
    pub fn new(strategy: S) -> Self {
        Self { strategy }
    }

    /// Returns the strategy.
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Starts a game from the board the client submitted.
    ///
    /// The submitted board may be blank or hold the human's opening mark.
    /// On a blank board `rng` decides which mark the engine plays; otherwise
    /// the engine takes the mark the human did not use. The engine then makes
    /// its first move.
    ///
    /// Returns the engine's mark and the resulting board.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidTransition`] if more than one square is filled.
    /// - [`EngineError::InternalInvariantViolation`] if the strategy fails.
    #[instrument(skip(self, submitted, rng), fields(submitted = %submitted))]
    pub fn start<R: Rng + ?Sized>(
        &self,
        submitted: Board,
        rng: &mut R,
    ) -> Result<(Mark, Board), EngineError> {
        let changed = Board::blank().diff(&submitted);

        let engine_mark = match changed.as_slice() {
            [] => {
                let mark = if rng.random::<bool>() {
                    Mark::Cross
                } else {
                    Mark::Nought
                };
                debug!(engine_mark = ?mark, "No opening move, engine mark chosen at random");
                mark
            }
            [pos] => match submitted.get(*pos) {
                Square::Occupied(human) => {
                    debug!(human_mark = ?human, position = %pos, "Human opened");
                    human.opponent()
                }
                Square::Empty => return Err(EngineError::InvalidTransition(INVALID_DIFF)),
            },
            _ => {
                debug!(changed = changed.len(), "Rejecting start with several marks");
                return Err(EngineError::InvalidTransition(INVALID_DIFF));
            }
        };

        let board = self.respond(submitted, engine_mark)?;
        Ok((engine_mark, board))
    }

    /// Validates the human's move from `previous` to `submitted` and replies.
    ///
    /// `engine_mark` is the mark the engine was assigned when the game
    /// started.
    ///
    /// Clients are never told which mark they hold. If the human's new mark
    /// equals `engine_mark`, it is quietly replaced by the opposite mark
    /// before the engine replies. This leniency exists for clients that
    /// always place `X`; new clients should not rely on it.
    ///
    /// If the human's move fills the board, the board is returned as is.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidState`] if `previous` is already full or won.
    /// - [`EngineError::InvalidTransition`] unless exactly one square changed
    ///   and that square is now occupied.
    /// - [`EngineError::InternalInvariantViolation`] if the strategy fails.
    #[instrument(skip(self, previous, submitted), fields(previous = %previous, submitted = %submitted))]
    pub fn play(
        &self,
        previous: &Board,
        mut submitted: Board,
        engine_mark: Mark,
    ) -> Result<Board, EngineError> {
        if previous.is_full() {
            return Err(EngineError::InvalidState("board is full"));
        }
        if previous.winner().is_some() {
            return Err(EngineError::InvalidState("board has a winner"));
        }

        let changed = previous.diff(&submitted);
        let [pos] = changed.as_slice() else {
            debug!(changed = changed.len(), "Rejecting move");
            return Err(EngineError::InvalidTransition(INVALID_DIFF));
        };
        let pos = *pos;

        match submitted.get(pos) {
            Square::Empty => return Err(EngineError::InvalidTransition("bad move")),
            Square::Occupied(mark) if mark == engine_mark => {
                debug!(position = %pos, "Human used the engine's mark, flipping");
                submitted.set(pos, Square::Occupied(mark.opponent()));
            }
            Square::Occupied(_) => {}
        }

        if submitted.is_full() {
            debug!("Board full after human move");
            return Ok(submitted);
        }

        self.respond(submitted, engine_mark)
    }

    /// Asks the strategy for a move and applies it.
    fn respond(&self, mut board: Board, mark: Mark) -> Result<Board, EngineError> {
        let Some(pos) = self.strategy.best_move(&board, mark) else {
            error!(board = %board, mark = ?mark, "Strategy returned no move");
            return Err(EngineError::InternalInvariantViolation(format!(
                "no move chosen on {board}"
            )));
        };

        if !board.is_empty(pos) {
            error!(board = %board, position = %pos, "Strategy chose an occupied square");
            return Err(EngineError::InternalInvariantViolation(format!(
                "used cell chosen at {}",
                describe(pos)
            )));
        }

        board.set(pos, Square::Occupied(mark));
        debug!(position = %pos, mark = ?mark, board = %board, "Engine moved");
        Ok(board)
    }
}

fn describe(pos: Position) -> String {
    format!("row {}, col {}", pos.row(), pos.col())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Minimax;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    /// Always answers with the same position, occupied or not.
    struct Stubborn(Position);

    impl Strategy for Stubborn {
        fn best_move(&self, _board: &Board, _mark: Mark) -> Option<Position> {
            Some(self.0)
        }
    }

    /// Never answers.
    struct Silent;

    impl Strategy for Silent {
        fn best_move(&self, _board: &Board, _mark: Mark) -> Option<Position> {
            None
        }
    }

    #[test]
    fn test_occupied_choice_is_internal_error() {
        let engine = Engine::new(Stubborn(Position::TopLeft));
        let previous = Board::parse("X0-------").unwrap();
        let submitted = Board::parse("X0X------").unwrap();

        let err = engine.play(&previous, submitted, Mark::Nought).unwrap_err();
        assert!(matches!(err, EngineError::InternalInvariantViolation(_)));
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_missing_choice_is_internal_error() {
        let engine = Engine::new(Silent);
        let mut rng = SmallRng::seed_from_u64(7);
        let err = engine.start(Board::blank(), &mut rng).unwrap_err();
        assert!(matches!(err, EngineError::InternalInvariantViolation(_)));
    }

    #[test]
    fn test_stub_strategy_move_applied() {
        let engine = Engine::new(Stubborn(Position::BottomRight));
        let previous = Board::parse("X0-------").unwrap();
        let submitted = Board::parse("X0X------").unwrap();

        let board = engine.play(&previous, submitted, Mark::Nought).unwrap();
        assert_eq!(board, Board::parse("X0X-----0").unwrap());
    }

    #[test]
    fn test_strategy_by_reference() {
        let minimax = Minimax::new();
        let engine = Engine::new(&minimax);
        let mut rng = SmallRng::seed_from_u64(1);
        let (_, board) = engine.start(Board::parse("X--------").unwrap(), &mut rng).unwrap();
        assert_eq!(board.mark_count(), 2);
    }
}
