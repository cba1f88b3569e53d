//! Noughts - command-line front end.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use noughts::{GameRepository, GameService, GameView, NoughtsConfig, Position, TurnReport};
use std::path::Path;
use tracing::{debug, instrument};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Config decides the log filter, so it is read under a temporary
    // stderr subscriber before the global one is installed.
    let config = tracing::subscriber::with_default(log_subscriber(env_filter("info")), || {
        resolve_config(&cli.config, cli.db.clone())
    })?;

    log_subscriber(env_filter(config.log_filter())).init();

    debug!(?config, "Configuration resolved");
    let service = open_service(&config)?;

    match cli.command {
        Command::New => {
            let view = service.new_game()?;
            println!("Started game {}", view.id());
            print_view(&view);
        }
        Command::List => list_games(&service)?,
        Command::Show { id } => print_view(&service.show(id)?),
        Command::Play { id, row, column } => print_turn(&service.play(id, row, column)?),
        Command::Move { id, cell } => {
            let position = Position::from_label_or_number(&cell)
                .with_context(|| format!("'{}' is not a cell (use 0-8 or a label like \"center\")", cell))?;
            print_turn(&service.play_at(id, position)?);
        }
    }

    Ok(())
}

/// `RUST_LOG` if set, otherwise `default_filter`.
fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Stderr log subscriber.
fn log_subscriber(filter: EnvFilter) -> impl tracing::Subscriber + Send + Sync {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish()
}

/// Reads the config file and applies the `--db` flag on top of it.
#[instrument(skip(db), fields(config_path = %config_path.display()))]
fn resolve_config(config_path: &Path, db: Option<String>) -> Result<NoughtsConfig> {
    let mut config = NoughtsConfig::load(config_path)?;
    if let Some(db) = db {
        debug!(%db, "Database path set on command line");
        config = config.with_db_path(db);
    }
    Ok(config)
}

/// Opens the database and brings its schema up to date.
#[instrument(skip(config), fields(db_path = %config.db_path()))]
fn open_service(config: &NoughtsConfig) -> Result<GameService> {
    let repo = GameRepository::new(config.db_path().clone())?;
    repo.run_migrations()?;
    Ok(GameService::new(repo))
}

fn list_games(service: &GameService) -> Result<()> {
    let views = service.index()?;
    if views.is_empty() {
        println!("No games yet. Start one with `noughts new`.");
    }
    for view in &views {
        println!("#{:<4} {:<24} updated {}", view.id(), status_line(view), view.updated_at());
    }
    Ok(())
}

fn status_line(view: &GameView) -> String {
    match view.outcome() {
        Some(outcome) => outcome.to_string(),
        None => format!("{} to move", view.current_mark()),
    }
}

fn print_view(view: &GameView) {
    println!("{}\n", view.game().board().display());
    println!("Game {}: {}", view.id(), status_line(view));
}

fn print_turn(turn: &TurnReport) {
    println!("{} played.\n", turn.mark());
    println!("{}\n", turn.view().game().board().display());
    match turn.announcement() {
        Some(message) => println!("{}", message),
        None => println!("{} to move", turn.view().current_mark()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_config_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = resolve_config(&dir.path().join("absent.toml"), None).unwrap();
        if std::env::var(noughts::DB_ENV_VAR).is_err() {
            assert_eq!(config, NoughtsConfig::default());
        }
        assert_eq!(config.log_filter(), "info");
    }

    #[test]
    fn test_resolve_config_db_flag_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("noughts.toml");
        std::fs::write(&path, "db_path = \"file.db\"\nlog_filter = \"debug\"\n").unwrap();

        let config = resolve_config(&path, Some("flag.db".to_string())).unwrap();
        assert_eq!(config.db_path(), "flag.db");
        assert_eq!(config.log_filter(), "debug");
    }
}
