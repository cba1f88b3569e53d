//! Errors from the game store.

use derive_more::{Display, Error};

/// Failure reading or writing the `games` table, tagged with the place in
/// this crate that raised it.
#[derive(Debug, Clone, Display, Error)]
#[display("Game store error: {} ({}:{})", message, file, line)]
pub struct DbError {
    /// What went wrong.
    pub message: String,
    /// Line that raised the error.
    pub line: u32,
    /// File that raised the error.
    pub file: &'static str,
}

impl DbError {
    /// Creates an error located at the caller.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Error for a stored board that does not parse as a 3x3 grid.
    #[track_caller]
    pub fn malformed_board(game_id: i32, err: &serde_json::Error) -> Self {
        Self::new(format!("Board column of game {} is not a 3x3 grid: {}", game_id, err))
    }
}

impl From<diesel::result::Error> for DbError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::new(format!("Query on games table failed: {}", err))
    }
}

impl From<diesel::ConnectionError> for DbError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        Self::new(format!("Could not open game database: {}", err))
    }
}

impl From<serde_json::Error> for DbError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("Board could not be encoded: {}", err))
    }
}
