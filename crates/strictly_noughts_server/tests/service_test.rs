//! Tests for the game lifecycle.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use strictly_noughts::{Board, Engine, Mark, Minimax};
use tempfile::NamedTempFile;

use strictly_noughts_server::{
    GameId, GameRepository, GameService, GameStatus, ServiceError, run_migrations,
};

fn setup_service(seed: u64) -> (NamedTempFile, GameService<Minimax>) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();
    run_migrations(&db_path).expect("Migrations failed");

    let service = GameService::new(
        GameRepository::new(db_path),
        Engine::new(Minimax::new()),
        SmallRng::seed_from_u64(seed),
    );
    (db_file, service)
}

fn board(s: &str) -> Board {
    Board::parse(s).expect("Valid board")
}

#[test]
fn test_create_with_opening_move() {
    let (_db, service) = setup_service(1);

    let game = service.create(board("X--------")).expect("Create failed");

    assert_eq!(game.board().serialize(), "X---0----");
    assert_eq!(*game.engine_mark(), Mark::Nought);
    assert_eq!(*game.status(), GameStatus::Running);
    assert_eq!(service.get(game.id()).unwrap(), game);
}

#[test]
fn test_create_blank_places_engine_mark() {
    let (_db, service) = setup_service(2);

    let game = service.create(Board::blank()).expect("Create failed");

    assert_eq!(game.board().mark_count(), 1);
    let glyph = game.engine_mark().glyph();
    assert!(game.board().serialize().contains(glyph));
}

#[test]
fn test_create_rejects_crowded_opening() {
    let (_db, service) = setup_service(3);

    let err = service.create(board("XX-------")).unwrap_err();

    assert_eq!(err, ServiceError::BadRequest("invalid board diff".to_string()));
    assert!(service.all().unwrap().is_empty());
}

#[test]
fn test_game_played_to_engine_win() {
    let (_db, service) = setup_service(4);
    let game = service.create(board("X--------")).unwrap();
    let id = game.id().clone();

    let game = service.update(&id, board("XX--0----")).unwrap();
    assert_eq!(game.board().serialize(), "XX0-0----");
    assert_eq!(*game.status(), GameStatus::Running);

    let game = service.update(&id, board("XX0X0----")).unwrap();
    assert_eq!(game.board().serialize(), "XX0X0-0--");
    assert_eq!(*game.status(), GameStatus::NoughtWon);

    let err = service.update(&id, board("XX0X0-0X-")).unwrap_err();
    assert_eq!(err, ServiceError::BadRequest("game is already over".to_string()));
    assert_eq!(service.get(&id).unwrap(), game);
}

#[test]
fn test_illegal_move_leaves_game_unchanged() {
    let (_db, service) = setup_service(5);
    let game = service.create(board("X--------")).unwrap();

    let err = service.update(game.id(), board("XX-X0----")).unwrap_err();

    assert_eq!(err, ServiceError::BadRequest("invalid board diff".to_string()));
    assert_eq!(service.get(game.id()).unwrap(), game);
}

#[test]
fn test_unknown_game_is_not_found() {
    let (_db, service) = setup_service(6);
    let id = GameId::generate();

    assert_eq!(service.get(&id), Err(ServiceError::NotFound));
    assert_eq!(
        service.update(&id, board("X--------")),
        Err(ServiceError::NotFound)
    );
    assert_eq!(service.delete(&id), Err(ServiceError::NotFound));
}

#[test]
fn test_delete_then_gone() {
    let (_db, service) = setup_service(7);
    let game = service.create(board("X--------")).unwrap();

    service.delete(game.id()).expect("Delete failed");

    assert_eq!(service.get(game.id()), Err(ServiceError::NotFound));
    assert!(service.all().unwrap().is_empty());
}

#[test]
fn test_concurrent_moves_are_serialized() {
    let (_db, service) = setup_service(8);
    let game = service.create(board("X--------")).unwrap();
    let id = game.id();

    let results: Vec<_> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..2)
            .map(|_| s.spawn(|| service.update(id, board("XX--0----"))))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let accepted = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(accepted, 1, "Results: {results:?}");
    assert!(
        results
            .iter()
            .any(|r| matches!(r, Err(ServiceError::BadRequest(_))))
    );
    assert_eq!(service.get(id).unwrap().board().serialize(), "XX0-0----");
}
