//! The game engine.
//!
//! A [`Game`] owns nothing but its [`Board`]. Whose turn it is, who moved
//! last and how many moves have been made are all computed from the number
//! of occupied squares, so a board reloaded from storage always resumes with
//! the correct turn.

use super::error::GameError;
use super::outcome::Outcome;
use super::position::Position;
use super::rules;
use super::types::{Board, Mark, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Noughts and crosses game engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Game {
    board: Board,
}

impl Game {
    /// Creates a new game with an empty board.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resumes a game from a previously stored board.
    #[instrument(skip(board))]
    pub fn from_board(board: Board) -> Self {
        Self { board }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Consumes the game, returning its board for storage.
    pub fn into_board(self) -> Board {
        self.board
    }

    /// Number of moves made so far.
    pub fn move_count(&self) -> usize {
        self.board.occupied_count()
    }

    /// The mark that fills the next square: `X` after an even number of
    /// moves, `O` after an odd number.
    pub fn current_mark(&self) -> Mark {
        if self.move_count() % 2 == 0 {
            Mark::X
        } else {
            Mark::O
        }
    }

    /// The mark that made the most recent move, or `None` before any move.
    pub fn last_mark(&self) -> Option<Mark> {
        (self.move_count() > 0).then(|| self.current_mark().opponent())
    }

    /// Places the current mark at `(row, column)`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidPosition`] if either coordinate is outside
    /// `0..=2`, or [`GameError::OccupiedCell`] if the cell already holds a
    /// mark. The board is unchanged on error.
    #[instrument(skip(self), fields(mark = %self.current_mark()))]
    pub fn apply_move(&mut self, row: usize, column: usize) -> Result<(), GameError> {
        let pos = Position::from_row_column(row, column)
            .ok_or(GameError::InvalidPosition { row, column })?;

        if !self.board.is_empty(pos) {
            debug!(%pos, "Rejected move into occupied cell");
            return Err(GameError::OccupiedCell { row, column });
        }

        let mark = self.current_mark();
        self.board.set(pos, Square::Occupied(mark));
        debug!(%pos, %mark, moves = self.move_count(), "Move applied");
        Ok(())
    }

    /// True if `mark` fully occupies a row, column or diagonal.
    pub fn is_winner(&self, mark: Mark) -> bool {
        rules::is_winner(&self.board, mark)
    }

    /// True if the player who just moved has won. False before any move.
    pub fn last_mover_won(&self) -> bool {
        self.last_mark().is_some_and(|mark| self.is_winner(mark))
    }

    /// The winning mark, if the last mover completed a line.
    pub fn winner(&self) -> Option<Mark> {
        self.last_mark().filter(|&mark| self.is_winner(mark))
    }

    /// True once the last mover has won or every square is filled.
    ///
    /// The engine keeps accepting moves afterwards; stopping play is up to
    /// the caller.
    pub fn is_game_over(&self) -> bool {
        self.last_mover_won() || rules::is_full(&self.board)
    }

    /// The result of a finished game, `None` while play continues.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.winner() {
            Some(mark) => Some(Outcome::Winner(mark)),
            None if rules::is_full(&self.board) => Some(Outcome::Draw),
            None => None,
        }
    }

    /// Cells that can still be played.
    pub fn valid_moves(&self) -> Vec<Position> {
        Position::valid_moves(&self.board)
    }

    /// Plays one turn: applies the move for the current mark and returns
    /// that mark if the move completed a line.
    ///
    /// # Errors
    ///
    /// Same as [`Game::apply_move`].
    #[instrument(skip(self))]
    pub fn play(&mut self, row: usize, column: usize) -> Result<Option<Mark>, GameError> {
        self.apply_move(row, column)?;
        let winner = self.winner();
        if let Some(mark) = winner {
            info!(%mark, "Player won");
        } else if self.is_game_over() {
            info!("Game drawn");
        }
        Ok(winner)
    }
}

impl From<Board> for Game {
    fn from(board: Board) -> Self {
        Self::from_board(board)
    }
}
