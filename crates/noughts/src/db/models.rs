//! Database models.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use noughts_core::Board;
use tracing::instrument;

use crate::db::{DbError, schema};

/// Stored game row.
///
/// The board column holds the JSON form of [`Board`]: three rows of three
/// cells, each `null`, `"X"` or `"O"`.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::games)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GameRecord {
    id: i32,
    #[getter(rename = "board_json")]
    board: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl GameRecord {
    /// Parses the stored board.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the column is not a 3x3 grid of marks.
    #[instrument(skip(self), fields(game_id = self.id))]
    pub fn board(&self) -> Result<Board, DbError> {
        serde_json::from_str(&self.board).map_err(|e| DbError::malformed_board(self.id, &e))
    }
}

/// Insertable game row.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::games)]
pub struct NewGameRecord {
    board: String,
}

impl NewGameRecord {
    /// Serializes `board` into a row ready for insertion.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if serialization fails.
    #[instrument(skip(board))]
    pub fn from_board(board: &Board) -> Result<Self, DbError> {
        Ok(Self::new(serde_json::to_string(board)?))
    }
}
