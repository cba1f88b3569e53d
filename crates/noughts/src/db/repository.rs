//! Database repository for stored games.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use noughts_core::Board;
use tracing::{debug, info, instrument};

use crate::db::{DbError, GameRecord, NewGameRecord, schema};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// How long a connection waits on a locked database before giving up.
const BUSY_TIMEOUT_MS: u32 = 5_000;

/// Database repository for game boards.
#[derive(Debug, Clone)]
pub struct GameRepository {
    db_path: String,
}

impl GameRepository {
    /// Creates a new repository for the database at the given path.
    ///
    /// Every operation opens its own connection, so the path must name a
    /// file; `":memory:"` would give each call a fresh, empty database.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the path is empty.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Result<Self, DbError> {
        if db_path.trim().is_empty() {
            return Err(DbError::new("Database path is empty"));
        }
        info!(path = %db_path, "Creating GameRepository");
        Ok(Self { db_path })
    }

    /// Path of the backing database file.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        let mut conn = SqliteConnection::establish(&self.db_path)
            .map_err(|e| DbError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))?;
        conn.batch_execute(&format!("PRAGMA busy_timeout = {};", BUSY_TIMEOUT_MS))?;
        Ok(conn)
    }

    /// Applies any pending schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a migration fails.
    #[instrument(skip(self))]
    pub fn run_migrations(&self) -> Result<(), DbError> {
        let mut conn = self.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(format!("Migration failed: {}", e)))?;
        info!(count = applied.len(), "Migrations applied");
        Ok(())
    }

    /// Stores a new game with the given board.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, board))]
    pub fn create_game(&self, board: &Board) -> Result<GameRecord, DbError> {
        let mut conn = self.connection()?;
        let new_game = NewGameRecord::from_board(board)?;

        let record = diesel::insert_into(schema::games::table)
            .values(&new_game)
            .returning(GameRecord::as_returning())
            .get_result(&mut conn)?;

        info!(game_id = record.id(), "Game created");
        Ok(record)
    }

    /// Gets a game by id. Returns `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn find_game(&self, id: i32) -> Result<Option<GameRecord>, DbError> {
        let mut conn = self.connection()?;

        let record = schema::games::table
            .find(id)
            .select(GameRecord::as_select())
            .first(&mut conn)
            .optional()?;

        debug!(found = record.is_some(), "Game lookup finished");
        Ok(record)
    }

    /// Lists all games, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn list_games(&self) -> Result<Vec<GameRecord>, DbError> {
        let mut conn = self.connection()?;

        let records = schema::games::table
            .order(schema::games::id.asc())
            .select(GameRecord::as_select())
            .load(&mut conn)?;

        info!(count = records.len(), "Games loaded");
        Ok(records)
    }

    /// Overwrites the stored board of a game. Returns `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, board))]
    pub fn save_game(&self, id: i32, board: &Board) -> Result<Option<GameRecord>, DbError> {
        let mut conn = self.connection()?;
        let json = serde_json::to_string(board)?;

        let record = diesel::update(schema::games::table.find(id))
            .set((
                schema::games::board.eq(json),
                schema::games::updated_at.eq(diesel::dsl::now),
            ))
            .returning(GameRecord::as_returning())
            .get_result(&mut conn)
            .optional()?;

        debug!(found = record.is_some(), "Game saved");
        Ok(record)
    }

    /// Loads a board, hands it to `apply`, and stores what `apply` returns,
    /// all inside one immediate transaction.
    ///
    /// The write lock is taken before the board is read, so two callers
    /// updating the same game run one after the other instead of both
    /// starting from the same board. When `apply` fails the transaction is
    /// rolled back and the stored board is untouched.
    ///
    /// Returns `None` if the game does not exist.
    ///
    /// # Errors
    ///
    /// Returns whatever `apply` returns, or a database error converted into
    /// the caller's error type.
    #[instrument(skip(self, apply))]
    pub fn update_board<T, E, F>(&self, id: i32, apply: F) -> Result<Option<(GameRecord, T)>, E>
    where
        F: FnOnce(Board) -> Result<(Board, T), E>,
        E: From<DbError> + From<diesel::result::Error>,
    {
        let mut conn = self.connection()?;

        conn.immediate_transaction::<_, E, _>(|conn| {
            let Some(record) = schema::games::table
                .find(id)
                .select(GameRecord::as_select())
                .first::<GameRecord>(conn)
                .optional()?
            else {
                debug!("Game not found");
                return Ok(None);
            };

            let (board, value) = apply(record.board()?)?;
            let json = serde_json::to_string(&board).map_err(DbError::from)?;

            let updated = diesel::update(schema::games::table.find(id))
                .set((
                    schema::games::board.eq(json),
                    schema::games::updated_at.eq(diesel::dsl::now),
                ))
                .returning(GameRecord::as_returning())
                .get_result::<GameRecord>(conn)?;

            debug!("Board updated");
            Ok(Some((updated, value)))
        })
    }
}
