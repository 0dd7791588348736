//! Cell-wise board comparison.

use crate::{Board, Position};

/// Returns the positions where `a` and `b` differ, in row-major order.
///
/// The move engine inspects the length of this list, and its single element
/// when there is exactly one, to decide whether a submitted board is one
/// legal step away from the stored one.
pub fn diff(a: &Board, b: &Board) -> Vec<Position> {
    Position::ALL
        .into_iter()
        .filter(|pos| a.get(*pos) != b.get(*pos))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_boards() {
        let board = Board::parse("X0-X-----").unwrap();
        assert!(diff(&board, &board).is_empty());
    }

    #[test]
    fn test_single_change() {
        let was = Board::parse("X--------").unwrap();
        let is = Board::parse("XX-------").unwrap();
        assert_eq!(diff(&was, &is), vec![Position::TopCenter]);
    }

    #[test]
    fn test_changes_in_row_major_order() {
        let was = Board::parse("XX0------").unwrap();
        let is = Board::parse("-X0X0---X").unwrap();
        assert_eq!(
            diff(&was, &is),
            vec![
                Position::TopLeft,
                Position::MiddleLeft,
                Position::Center,
                Position::BottomRight
            ]
        );
    }

    #[test]
    fn test_replaced_mark_counts_as_change() {
        let was = Board::parse("X--------").unwrap();
        let is = Board::parse("0--------").unwrap();
        assert_eq!(diff(&was, &is), vec![Position::TopLeft]);
    }
}
