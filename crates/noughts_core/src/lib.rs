//! Noughts and crosses game engine.
//!
//! Board representation, move validation, turn derivation and win/draw
//! detection for a 3x3 game between `X` and `O`. The engine is pure
//! in-memory computation; storing boards between moves is left to callers.
//!
//! # Example
//!
//! ```
//! use noughts_core::{Game, Mark};
//!
//! let mut game = Game::new();
//! assert_eq!(game.current_mark(), Mark::X);
//!
//! game.play(1, 1)?;
//! assert_eq!(game.current_mark(), Mark::O);
//! assert!(!game.is_game_over());
//! # Ok::<(), noughts_core::GameError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod game;
mod outcome;
mod position;
pub mod rules;
mod types;

pub use error::GameError;
pub use game::Game;
pub use outcome::Outcome;
pub use position::Position;
pub use types::{Board, Mark, Square};
