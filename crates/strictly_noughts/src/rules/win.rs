//! Win detection logic.

use crate::{Board, Mark, Position, Square};

/// Lines in scan order: rows, then columns, then the two diagonals.
const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Checks if there is a winner on the board.
///
/// Returns the mark holding the first complete line found. Legal play can
/// only ever produce one winner; on a malformed board with lines for both
/// marks the scan order above decides.
pub fn check_winner(board: &Board) -> Option<Mark> {
    for [a, b, c] in LINES {
        let square = board.get(a);
        if let Square::Occupied(mark) = square
            && square == board.get(b)
            && square == board.get(c)
        {
            return Some(mark);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(check_winner(&Board::blank()), None);
    }

    #[test]
    fn test_winner_top_row() {
        let board = Board::parse("XXX00----").unwrap();
        assert_eq!(check_winner(&board), Some(Mark::Cross));
    }

    #[test]
    fn test_winner_column() {
        let board = Board::parse("X0-X0--0X").unwrap();
        assert_eq!(check_winner(&board), Some(Mark::Nought));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let board = Board::parse("X-0X0-0--").unwrap();
        assert_eq!(check_winner(&board), Some(Mark::Nought));
    }

    #[test]
    fn test_no_winner_incomplete() {
        let board = Board::parse("XX-00----").unwrap();
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_upper_row_scanned_first() {
        // Malformed: both marks hold a row.
        let board = Board::parse("000XXX---").unwrap();
        assert_eq!(check_winner(&board), Some(Mark::Nought));
    }

    #[test]
    fn test_left_column_scanned_first() {
        // Malformed: both marks hold a column.
        let board = Board::parse("X0-X0-X0-").unwrap();
        assert_eq!(check_winner(&board), Some(Mark::Cross));
    }
}
