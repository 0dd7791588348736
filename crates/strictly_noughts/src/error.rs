//! Error types for board parsing and move validation.

/// Error raised when a serialized board is malformed.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum BoardError {
    /// The input is not exactly nine characters long.
    #[display("invalid board: expected 9 squares, got {}", len)]
    InvalidLength {
        /// Number of characters received.
        len: usize,
    },

    /// The input contains a character that is not a board glyph.
    #[display("invalid board: unexpected glyph {:?} at index {}", glyph, index)]
    InvalidGlyph {
        /// Offending character.
        glyph: char,
        /// Character index within the input.
        index: usize,
    },
}

impl std::error::Error for BoardError {}

/// Error raised by the move engine.
///
/// The first three variants describe bad client input and are safe to show
/// to the caller. [`EngineError::InternalInvariantViolation`] means the
/// engine itself misbehaved.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum EngineError {
    /// The submitted board could not be parsed.
    #[display("{}", _0)]
    InvalidFormat(BoardError),

    /// The submitted board is not a single legal step from the previous one.
    #[display("{}", _0)]
    InvalidTransition(&'static str),

    /// The game is already over.
    #[display("{}", _0)]
    InvalidState(&'static str),

    /// The search strategy produced an unusable move.
    #[display("internal invariant violated: {}", _0)]
    InternalInvariantViolation(String),
}

impl EngineError {
    /// Returns true if the error was caused by client input.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, EngineError::InternalInvariantViolation(_))
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::InvalidFormat(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BoardError> for EngineError {
    fn from(err: BoardError) -> Self {
        EngineError::InvalidFormat(err)
    }
}
