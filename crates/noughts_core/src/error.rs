//! Errors raised when applying a move.

use derive_more::{Display, Error};

/// Error that can occur when applying a move.
///
/// The board is never modified when one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum GameError {
    /// The target cell already holds a mark.
    #[display("Cell ({}, {}) is already occupied", row, column)]
    OccupiedCell {
        /// Row of the rejected move.
        row: usize,
        /// Column of the rejected move.
        column: usize,
    },

    /// Row or column is outside `0..=2`.
    #[display("Position ({}, {}) is off the board", row, column)]
    InvalidPosition {
        /// Row of the rejected move.
        row: usize,
        /// Column of the rejected move.
        column: usize,
    },
}
