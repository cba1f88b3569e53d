//! Game rules for noughts and crosses.
//!
//! Pure functions over a [`Board`](crate::Board). The [`Game`](crate::Game)
//! engine composes them; they are kept separate so callers can evaluate an
//! arbitrary board without building a game around it.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{LINES, check_winner, is_winner, winning_line};
