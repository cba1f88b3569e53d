//! Tests for the game service: the per-turn load, move and save cycle.

use noughts::{
    GameError, GameRepository, GameService, Mark, Outcome, Position, ServiceError, Square,
};
use std::sync::Arc;
use std::thread;
use tempfile::NamedTempFile;

fn setup_service() -> (NamedTempFile, GameService) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();

    let repo = GameRepository::new(db_path).expect("Failed to create repository");
    repo.run_migrations().expect("Migrations failed");
    (db_file, GameService::new(repo))
}

fn play_all(service: &GameService, id: i32, moves: &[(usize, usize)]) {
    for &(row, column) in moves {
        service.play(id, row, column).expect("Valid move");
    }
}

#[test]
fn test_new_game_starts_with_x() {
    let (_db, service) = setup_service();
    let view = service.new_game().expect("Create failed");

    assert_eq!(view.current_mark(), Mark::X);
    assert_eq!(view.game().move_count(), 0);
    assert_eq!(view.outcome(), None);
}

#[test]
fn test_show_missing_game() {
    let (_db, service) = setup_service();
    let result = service.show(404);
    assert!(matches!(result, Err(ServiceError::NotFound { id: 404 })));
}

#[test]
fn test_turns_persist_between_requests() {
    let (_db, service) = setup_service();
    let id = *service.new_game().expect("Create failed").id();

    let turn = service.play(id, 2, 0).expect("Valid move");
    assert_eq!(*turn.mark(), Mark::X);
    assert_eq!(*turn.winner(), None);
    assert_eq!(turn.announcement(), None);

    let view = service.show(id).expect("Show failed");
    assert_eq!(view.current_mark(), Mark::O);
    assert_eq!(
        view.game().board().get(Position::BottomLeft),
        Square::Occupied(Mark::X)
    );

    let turn = service.play(id, 0, 0).expect("Valid move");
    assert_eq!(*turn.mark(), Mark::O);
}

#[test]
fn test_occupied_cell_leaves_stored_board_unchanged() {
    let (_db, service) = setup_service();
    let id = *service.new_game().expect("Create failed").id();
    service.play(id, 1, 1).expect("Valid move");
    let before = service.show(id).expect("Show failed");

    let result = service.play(id, 1, 1);
    assert!(matches!(
        result,
        Err(ServiceError::Game(GameError::OccupiedCell { row: 1, column: 1 }))
    ));

    let after = service.show(id).expect("Show failed");
    assert_eq!(after.game(), before.game());
    assert_eq!(after.current_mark(), Mark::O);
}

#[test]
fn test_off_board_move_rejected() {
    let (_db, service) = setup_service();
    let id = *service.new_game().expect("Create failed").id();

    let result = service.play(id, 0, 3);
    assert!(matches!(
        result,
        Err(ServiceError::Game(GameError::InvalidPosition { row: 0, column: 3 }))
    ));
    assert_eq!(service.show(id).expect("Show failed").game().move_count(), 0);
}

#[test]
fn test_winning_move_announced() {
    let (_db, service) = setup_service();
    let id = *service.new_game().expect("Create failed").id();
    play_all(&service, id, &[(0, 0), (1, 0), (0, 1), (1, 1)]);

    let turn = service.play(id, 0, 2).expect("Valid move");
    assert_eq!(*turn.winner(), Some(Mark::X));
    assert_eq!(turn.announcement().as_deref(), Some("Player X is the winner!"));
    assert_eq!(turn.view().outcome(), Some(Outcome::Winner(Mark::X)));
}

#[test]
fn test_moves_rejected_after_win() {
    let (_db, service) = setup_service();
    let id = *service.new_game().expect("Create failed").id();
    play_all(&service, id, &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);

    let result = service.play(id, 2, 2);
    assert!(matches!(result, Err(ServiceError::GameOver { id: rejected }) if rejected == id));
    assert_eq!(service.show(id).expect("Show failed").game().move_count(), 5);
}

#[test]
fn test_draw_reported_and_closes_game() {
    let (_db, service) = setup_service();
    let id = *service.new_game().expect("Create failed").id();
    play_all(
        &service,
        id,
        &[(0, 0), (0, 1), (0, 2), (1, 1), (1, 0), (1, 2), (2, 1), (2, 0)],
    );

    let turn = service.play(id, 2, 2).expect("Valid move");
    assert_eq!(*turn.winner(), None);
    assert_eq!(turn.view().outcome(), Some(Outcome::Draw));
    assert_eq!(turn.announcement().as_deref(), Some("It's a draw!"));
}

#[test]
fn test_play_at_position() {
    let (_db, service) = setup_service();
    let id = *service.new_game().expect("Create failed").id();

    let turn = service.play_at(id, Position::Center).expect("Valid move");
    assert_eq!(
        turn.view().game().board().get(Position::Center),
        Square::Occupied(Mark::X)
    );
}

#[test]
fn test_play_missing_game() {
    let (_db, service) = setup_service();
    let result = service.play(12, 0, 0);
    assert!(matches!(result, Err(ServiceError::NotFound { id: 12 })));
}

#[test]
fn test_index_lists_games_with_status() {
    let (_db, service) = setup_service();
    let first = *service.new_game().expect("Create failed").id();
    let second = *service.new_game().expect("Create failed").id();
    service.play(second, 1, 1).expect("Valid move");

    let views = service.index().expect("Index failed");
    assert_eq!(views.len(), 2);
    assert_eq!(*views[0].id(), first);
    assert_eq!(views[0].current_mark(), Mark::X);
    assert_eq!(*views[1].id(), second);
    assert_eq!(views[1].current_mark(), Mark::O);
}

#[test]
fn test_games_are_independent() {
    let (_db, service) = setup_service();
    let a = *service.new_game().expect("Create failed").id();
    let b = *service.new_game().expect("Create failed").id();

    service.play(a, 0, 0).expect("Valid move");
    service.play(b, 0, 0).expect("Same cell in another game is free");

    assert_eq!(service.show(a).expect("Show failed").game().move_count(), 1);
    assert_eq!(service.show(b).expect("Show failed").game().move_count(), 1);
}

#[test]
fn test_concurrent_moves_on_same_cell_apply_once() {
    const PLAYERS: usize = 8;

    let (_db, service) = setup_service();
    let service = Arc::new(service);

    for _ in 0..5 {
        let id = *service.new_game().expect("Create failed").id();

        let handles: Vec<_> = (0..PLAYERS)
            .map(|_| {
                let service = Arc::clone(&service);
                thread::spawn(move || service.play(id, 1, 1))
            })
            .collect();
        let results: Vec<_> = handles
            .into_iter()
            .map(|h| h.join().expect("Player thread panicked"))
            .collect();

        let accepted = results.iter().filter(|r| r.is_ok()).count();
        let occupied = results
            .iter()
            .filter(|r| {
                matches!(
                    r,
                    Err(ServiceError::Game(GameError::OccupiedCell { row: 1, column: 1 }))
                )
            })
            .count();
        assert_eq!(accepted, 1, "results: {results:?}");
        assert_eq!(occupied, PLAYERS - 1, "results: {results:?}");

        let view = service.show(id).expect("Show failed");
        assert_eq!(view.game().move_count(), 1);
        assert_eq!(view.current_mark(), Mark::O);
    }
}

#[test]
fn test_concurrent_moves_on_different_cells_all_land() {
    let (_db, service) = setup_service();
    let service = Arc::new(service);
    let id = *service.new_game().expect("Create failed").id();

    let cells = [(0, 0), (0, 1), (1, 0), (2, 2)];
    let handles: Vec<_> = cells
        .into_iter()
        .map(|(row, column)| {
            let service = Arc::clone(&service);
            thread::spawn(move || service.play(id, row, column))
        })
        .collect();
    for handle in handles {
        handle
            .join()
            .expect("Player thread panicked")
            .expect("Distinct cells never conflict");
    }

    let game = service.show(id).expect("Show failed").game().clone();
    assert_eq!(game.move_count(), 4);
    let x_count = game
        .board()
        .squares()
        .filter(|s| *s == Square::Occupied(Mark::X))
        .count();
    assert_eq!(x_count, 2);
}
