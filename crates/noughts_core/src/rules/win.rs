//! Win detection logic.

use crate::{Board, Mark, Position, Square};
use tracing::{instrument, trace};

/// The eight winning lines: rows, then columns, then diagonals.
pub const LINES: [[Position; 3]; 8] = [
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

/// Returns the first line fully occupied by `mark`, if any.
#[instrument(skip(board))]
pub fn winning_line(board: &Board, mark: Mark) -> Option<[Position; 3]> {
    let target = Square::Occupied(mark);
    let line = LINES
        .into_iter()
        .find(|line| line.iter().all(|&pos| board.get(pos) == target));
    if let Some(line) = line {
        trace!(?line, %mark, "Winning line found");
    }
    line
}

/// True if `mark` occupies a complete row, column or diagonal.
pub fn is_winner(board: &Board, mark: Mark) -> bool {
    winning_line(board, mark).is_some()
}

/// Checks if either mark has three in a row.
///
/// On a board that (illegally) holds lines for both marks, `X` is reported.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<Mark> {
    <Mark as strum::IntoEnumIterator>::iter().find(|&mark| is_winner(board, mark))
}
