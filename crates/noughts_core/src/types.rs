//! Core domain types for noughts and crosses.

use super::position::Position;
use serde::{Deserialize, Serialize};

/// A player's mark.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum Mark {
    /// Mark X (always moves first).
    X,
    /// Mark O (moves second).
    O,
}

impl Mark {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A cell on the board.
///
/// Serializes as `null` when empty and as the mark (`"X"` / `"O"`) otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<Mark>", into = "Option<Mark>")]
pub enum Square {
    /// Nobody has played here yet.
    #[default]
    Empty,
    /// Cell taken by a mark.
    Occupied(Mark),
}

impl Square {
    /// True if no mark has been placed here.
    pub fn is_empty(self) -> bool {
        matches!(self, Square::Empty)
    }

    /// True if a mark has been placed here.
    pub fn is_occupied(self) -> bool {
        !self.is_empty()
    }

    /// Returns the occupying mark, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Square::Empty => None,
            Square::Occupied(mark) => Some(mark),
        }
    }
}

impl From<Option<Mark>> for Square {
    fn from(mark: Option<Mark>) -> Self {
        mark.map_or(Square::Empty, Square::Occupied)
    }
}

impl From<Square> for Option<Mark> {
    fn from(square: Square) -> Self {
        square.mark()
    }
}

/// 3x3 board, stored row by row.
///
/// Serializes as a 3-element array of 3-element rows, so a stored board
/// always reloads with the same row/column ordering and shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    rows: [[Square; 3]; 3],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from explicit rows.
    pub fn from_rows(rows: [[Square; 3]; 3]) -> Self {
        Self { rows }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.rows[pos.row()][pos.column()]
    }

    /// Sets the square at the given position.
    pub fn set(&mut self, pos: Position, square: Square) {
        self.rows[pos.row()][pos.column()] = square;
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos).is_empty()
    }

    /// Returns the rows of the board.
    pub fn rows(&self) -> &[[Square; 3]; 3] {
        &self.rows
    }

    /// Iterates over every square in row-major order.
    pub fn squares(&self) -> impl Iterator<Item = Square> + '_ {
        self.rows.iter().flatten().copied()
    }

    /// Number of occupied squares.
    pub fn occupied_count(&self) -> usize {
        self.squares().filter(|s| s.is_occupied()).count()
    }

    /// Formats the board as a human-readable grid.
    ///
    /// Empty squares show their index so a player can see what to type.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for (row, cells) in self.rows.iter().enumerate() {
            for (col, square) in cells.iter().enumerate() {
                let symbol = match square {
                    Square::Empty => (row * 3 + col).to_string(),
                    Square::Occupied(mark) => mark.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_all_empty() {
        let board = Board::new();
        assert_eq!(board.rows().len(), 3);
        assert!(board.rows().iter().all(|row| row.len() == 3));
        assert!(board.squares().all(Square::is_empty));
        assert_eq!(board.occupied_count(), 0);
    }

    #[test]
    fn test_square_json_form() {
        assert_eq!(serde_json::to_string(&Square::Empty).unwrap(), "null");
        assert_eq!(
            serde_json::to_string(&Square::Occupied(Mark::O)).unwrap(),
            "\"O\""
        );
    }

    #[test]
    fn test_board_json_is_row_major() {
        let mut board = Board::new();
        board.set(Position::TopCenter, Square::Occupied(Mark::X));
        board.set(Position::BottomCenter, Square::Occupied(Mark::O));

        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(
            json,
            r#"[[null,"X",null],[null,null,null],[null,"O",null]]"#
        );
        let restored: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, board);
    }

    #[test]
    fn test_board_json_rejects_wrong_shape() {
        assert!(serde_json::from_str::<Board>("[[null,null],[null,null]]").is_err());
        assert!(
            serde_json::from_str::<Board>(
                "[[null,null,null],[null,null,null],[null,null,null],[null,null,null]]"
            )
            .is_err()
        );
        assert!(
            serde_json::from_str::<Board>(
                r#"[["Z",null,null],[null,null,null],[null,null,null]]"#
            )
            .is_err()
        );
    }

    #[test]
    fn test_occupied_count_tracks_marks() {
        let mut board = Board::new();
        board.set(Position::TopLeft, Square::Occupied(Mark::X));
        board.set(Position::Center, Square::Occupied(Mark::O));
        assert_eq!(board.occupied_count(), 2);

        board.set(Position::Center, Square::Empty);
        assert_eq!(board.occupied_count(), 1);
    }

    #[test]
    fn test_display() {
        let mut board = Board::new();
        board.set(Position::Center, Square::Occupied(Mark::X));
        assert_eq!(board.display(), "0|1|2\n-+-+-\n3|X|5\n-+-+-\n6|7|8");
    }
}
