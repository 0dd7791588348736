//! Game rules for noughts and crosses.
//!
//! Pure functions over [`Board`](crate::Board) values. Rules are kept apart
//! from board storage so the engine and the search share one definition of
//! a win, a full board and a single-move transition.

mod diff;
mod draw;
mod win;

pub use diff::diff;
pub use draw::{is_draw, is_full};
pub use win::check_winner;
