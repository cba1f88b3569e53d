//! Noughts - stored noughts and crosses games.
//!
//! Wraps the [`noughts_core`] engine with the plumbing around it:
//!
//! - **Database**: boards stored per game id in SQLite
//! - **Service**: create, list, show, and play a turn with load/move/save in
//!   one transaction
//! - **Config**: `noughts.toml` plus environment overrides
//!
//! # Example
//!
//! ```no_run
//! use noughts::{GameRepository, GameService};
//!
//! # fn example() -> anyhow::Result<()> {
//! let repo = GameRepository::new("noughts.db".to_string())?;
//! repo.run_migrations()?;
//!
//! let service = GameService::new(repo);
//! let game = service.new_game()?;
//! let turn = service.play(*game.id(), 1, 1)?;
//! println!("{}", turn.view().game().board().display());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod db;
mod service;

pub use config::{ConfigError, DB_ENV_VAR, NoughtsConfig};
pub use db::{DbError, GameRecord, GameRepository, NewGameRecord};
pub use service::{GameService, GameView, ServiceError, TurnReport};

pub use noughts_core::{Board, Game, GameError, Mark, Outcome, Position, Square};
