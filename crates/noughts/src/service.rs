//! Per-request game operations: create, list, show and play a turn.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_more::{Display, Error};
use noughts_core::{Game, GameError, Mark, Outcome, Position};
use tracing::{info, instrument, warn};

use crate::db::{DbError, GameRecord, GameRepository};

/// Errors surfaced to whoever drives the service.
#[derive(Debug, Clone, Display, Error)]
pub enum ServiceError {
    /// The move was rejected by the engine.
    #[display("{}", _0)]
    Game(#[error(source)] GameError),

    /// Storage failed.
    #[display("{}", _0)]
    Db(#[error(source)] DbError),

    /// No game with this id.
    #[display("Game {} not found", id)]
    NotFound {
        /// Requested game id.
        id: i32,
    },

    /// The game has already been won or drawn.
    #[display("Game {} is already over", id)]
    GameOver {
        /// Requested game id.
        id: i32,
    },
}

impl From<GameError> for ServiceError {
    fn from(err: GameError) -> Self {
        Self::Game(err)
    }
}

impl From<DbError> for ServiceError {
    fn from(err: DbError) -> Self {
        Self::Db(err)
    }
}

impl From<diesel::result::Error> for ServiceError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::Db(DbError::from(err))
    }
}

/// A stored game, ready for presentation.
#[derive(Debug, Clone, Getters)]
pub struct GameView {
    id: i32,
    game: Game,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl GameView {
    /// Builds a view from a stored row.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the stored board cannot be parsed.
    #[instrument(skip(record), fields(game_id = record.id()))]
    pub fn from_record(record: &GameRecord) -> Result<Self, DbError> {
        Ok(Self {
            id: *record.id(),
            game: Game::from_board(record.board()?),
            created_at: *record.created_at(),
            updated_at: *record.updated_at(),
        })
    }

    /// Mark due to play next.
    pub fn current_mark(&self) -> Mark {
        self.game.current_mark()
    }

    /// Result of the game, if it has finished.
    pub fn outcome(&self) -> Option<Outcome> {
        self.game.outcome()
    }
}

/// Result of a single turn.
#[derive(Debug, Clone, Getters)]
pub struct TurnReport {
    view: GameView,
    mark: Mark,
    winner: Option<Mark>,
}

impl TurnReport {
    /// Message announcing the end of the game, if this turn ended it.
    pub fn announcement(&self) -> Option<String> {
        self.view.outcome().map(|outcome| outcome.to_string())
    }
}

/// Game operations backed by a [`GameRepository`].
#[derive(Debug, Clone)]
pub struct GameService {
    repo: GameRepository,
}

impl GameService {
    /// Creates a service over the given repository.
    pub fn new(repo: GameRepository) -> Self {
        Self { repo }
    }

    /// Starts and stores a new game.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Db`] if the game cannot be stored.
    #[instrument(skip(self))]
    pub fn new_game(&self) -> Result<GameView, ServiceError> {
        let game = Game::new();
        let record = self.repo.create_game(game.board())?;
        Ok(GameView::from_record(&record)?)
    }

    /// Loads a stored game.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] if no game has this id.
    #[instrument(skip(self))]
    pub fn show(&self, id: i32) -> Result<GameView, ServiceError> {
        let record = self
            .repo
            .find_game(id)?
            .ok_or(ServiceError::NotFound { id })?;
        Ok(GameView::from_record(&record)?)
    }

    /// Lists every stored game, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Db`] if a stored game cannot be read.
    #[instrument(skip(self))]
    pub fn index(&self) -> Result<Vec<GameView>, ServiceError> {
        let views = self
            .repo
            .list_games()?
            .iter()
            .map(GameView::from_record)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(views)
    }

    /// Plays the current mark at `(row, column)` and stores the result.
    ///
    /// Load, move and save happen in one transaction; a rejected move
    /// leaves the stored board as it was.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::NotFound`] if no game has this id
    /// - [`ServiceError::GameOver`] if the game is already won or drawn
    /// - [`ServiceError::Game`] if the cell is occupied or off the board
    #[instrument(skip(self))]
    pub fn play(&self, id: i32, row: usize, column: usize) -> Result<TurnReport, ServiceError> {
        let result = self.repo.update_board(id, |board| {
            let mut game = Game::from_board(board);
            if game.is_game_over() {
                return Err(ServiceError::GameOver { id });
            }
            let mark = game.current_mark();
            let winner = game.play(row, column)?;
            Ok((game.into_board(), (mark, winner)))
        });

        let (record, (mark, winner)) = match result {
            Ok(Some(updated)) => updated,
            Ok(None) => return Err(ServiceError::NotFound { id }),
            Err(err) => {
                warn!(error = %err, "Move rejected");
                return Err(err);
            }
        };

        let view = GameView::from_record(&record)?;
        if let Some(outcome) = view.outcome() {
            info!(%outcome, "Game finished");
        }
        Ok(TurnReport { view, mark, winner })
    }

    /// Plays the current mark at `position`.
    ///
    /// # Errors
    ///
    /// Same as [`GameService::play`].
    pub fn play_at(&self, id: i32, position: Position) -> Result<TurnReport, ServiceError> {
        self.play(id, position.row(), position.column())
    }
}
