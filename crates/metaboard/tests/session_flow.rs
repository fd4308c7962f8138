//! End-to-end play through the key router, plus persistence.

use crossterm::event::KeyCode;
use metaboard::{GameConfig, InputOutcome, InputRouter, TurnCoordinator, store};
use metaboard_core::{Action, Coord, GameStatus, Player};
use std::io::Write;

fn standard_session() -> TurnCoordinator {
    TurnCoordinator::new(&GameConfig::default()).unwrap()
}

#[test]
fn test_keys_descend_then_place_and_redirect() {
    let mut session = standard_session();
    let mut router = InputRouter::new(3);

    assert_eq!(router.handle_key(KeyCode::Enter, &mut session), InputOutcome::Descended);
    assert_eq!(session.board().selection(), (1, 36));

    assert_eq!(
        router.handle_key(KeyCode::Char(' '), &mut session),
        InputOutcome::Placed(GameStatus::InProgress)
    );
    assert_eq!(session.board().raw_value(40), 1);
    assert_eq!(session.board().selection(), (1, 36));
    assert_eq!(session.current_player().id(), 2);

    // Digit 1 is the top-left cell.
    assert_eq!(
        router.handle_key(KeyCode::Char('1'), &mut session),
        InputOutcome::Placed(GameStatus::InProgress)
    );
    assert_eq!(session.board().raw_value(36), 2);
    assert_eq!(session.board().selection(), (1, 0));
    assert_eq!(router.cursor(), Coord::new(1, 1));
}

#[test]
fn test_occupied_leaf_is_rejected_without_turn_change() {
    let mut session = TurnCoordinator::new(&GameConfig::new(3, 1, 2)).unwrap();
    let mut router = InputRouter::new(3);
    router.handle_key(KeyCode::Enter, &mut session);

    match router.handle_key(KeyCode::Enter, &mut session) {
        InputOutcome::Rejected(reason) => assert!(reason.contains("occupied"), "{reason}"),
        other => panic!("expected rejection, got {other:?}"),
    }
    assert_eq!(session.current_player().id(), 2);
    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_movement_and_quit_keys() {
    let mut session = standard_session();
    let mut router = InputRouter::new(3);
    assert_eq!(router.handle_key(KeyCode::Char('k'), &mut session), InputOutcome::Moved);
    assert_eq!(router.handle_key(KeyCode::Left, &mut session), InputOutcome::Moved);
    assert_eq!(router.cursor(), Coord::new(0, 0));
    assert_eq!(router.handle_key(KeyCode::Tab, &mut session), InputOutcome::Ignored);
    assert_eq!(router.handle_key(KeyCode::Esc, &mut session), InputOutcome::Quit);
    assert!(session.history().is_empty());
}

#[test]
fn test_restart_key_resets_session() {
    let mut session = standard_session();
    let mut router = InputRouter::new(3);
    router.handle_key(KeyCode::Enter, &mut session);
    router.handle_key(KeyCode::Enter, &mut session);
    assert_eq!(router.handle_key(KeyCode::Char('r'), &mut session), InputOutcome::Restarted);
    assert_eq!(session, standard_session());
}

#[test]
fn test_replay_rebuilds_the_same_session() {
    let config = GameConfig::default();
    let mut session = TurnCoordinator::new(&config).unwrap();
    session.select(Coord::new(0, 0)).unwrap();
    for coord in [Coord::new(0, 0), Coord::new(1, 1), Coord::new(2, 2)] {
        session.place(coord).unwrap();
    }

    let replayed = TurnCoordinator::replay(&config, session.history()).unwrap();
    assert_eq!(replayed, session);
}

#[test]
fn test_replay_reports_bad_action() {
    let config = GameConfig::new(3, 1, 2);
    let first = Player::FIRST;
    let actions = [
        Action::Place(metaboard_core::Move::new(first, Coord::new(0, 0))),
        Action::Place(metaboard_core::Move::new(first, Coord::new(1, 1))),
    ];
    let err = TurnCoordinator::replay(&config, &actions).unwrap_err();
    assert!(err.to_string().contains("action 1"), "{err}");
}

#[test]
fn test_save_and_load_session() {
    let mut session = standard_session();
    session.select(Coord::new(2, 1)).unwrap();
    session.place(Coord::new(0, 2)).unwrap();

    let file = tempfile::NamedTempFile::new().unwrap();
    store::save(&session, file.path()).unwrap();
    let loaded = store::load(file.path()).unwrap();
    assert_eq!(loaded, session);
    assert_eq!(loaded.current_player().id(), 2);
}

#[test]
fn test_load_rejects_tampered_board() {
    let session = TurnCoordinator::new(&GameConfig::new(3, 1, 2)).unwrap();
    let mut snapshot = session.snapshot();
    snapshot.board.cells[0] = 1;
    snapshot.board.cells[1] = 1;
    snapshot.board.cells[2] = 1;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(serde_json::to_string(&snapshot).unwrap().as_bytes()).unwrap();
    assert!(store::load(file.path()).is_err());
}

#[test]
fn test_config_file_with_overrides() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "grid = 2\ndepth = 3\nplayers = 3").unwrap();

    let config = GameConfig::from_file(file.path()).unwrap();
    assert_eq!(config, GameConfig::new(2, 3, 3));
    let session = TurnCoordinator::new(&config.with_overrides(None, Some(1), None)).unwrap();
    assert_eq!(session.board().geometry().leaf_count(), 4);
    assert_eq!(session.players(), 3);
}

#[test]
fn test_missing_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = GameConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.contains("Failed to read"));
}
