//! Command-line interface for noughts.

use clap::{Parser, Subcommand};

/// Noughts - play noughts and crosses against a stored board
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Play noughts and crosses, one stored move at a time", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "noughts.toml", global = true)]
    pub config: std::path::PathBuf,

    /// Database file (overrides config and NOUGHTS_DB)
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start a new game and print its id
    New,

    /// List all games
    List,

    /// Show a game's board and status
    Show {
        /// Game id
        id: i32,
    },

    /// Play the next mark at a row and column (0-2)
    Play {
        /// Game id
        id: i32,

        /// Row (0-2)
        row: usize,

        /// Column (0-2)
        column: usize,
    },

    /// Play the next mark at a cell given by index (0-8) or label ("center")
    Move {
        /// Game id
        id: i32,

        /// Cell index or label
        cell: String,
    },
}
