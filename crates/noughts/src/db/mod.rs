//! Database persistence for game boards.

mod error;
mod models;
mod repository;
mod schema;

pub use error::DbError;
pub use models::{GameRecord, NewGameRecord};
pub use repository::GameRepository;
