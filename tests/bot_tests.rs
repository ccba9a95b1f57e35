//! Bot tests: placement search, evaluator seam, attract mode

use blockfall::bot::{
    apply_placement, find_best_move, find_best_move_with, AttractBot, AttractStep, PlaceError,
    PlacementEvaluator,
};
use blockfall::core::{Board, GameConfig, GameState, Piece};
use blockfall::types::PieceKind;

/// Prefers a tall leftmost column.
struct LeftTower;

impl PlacementEvaluator for LeftTower {
    fn evaluate(&self, board: &Board) -> f64 {
        board.column_heights()[0] as f64
    }
}

#[test]
fn search_is_deterministic() {
    let mut board = Board::new(10, 20);
    for x in [0, 1, 2, 5, 6] {
        board.set(x, 19, Some(PieceKind::L));
    }
    board.set(6, 18, Some(PieceKind::L));
    for kind in PieceKind::ALL {
        let piece = Piece::spawn(kind, 10);
        assert_eq!(
            find_best_move(&board, &piece),
            find_best_move(&board, &piece),
            "{kind:?}"
        );
    }
}

#[test]
fn horizontal_i_completes_the_bottom_row() {
    let mut board = Board::new(10, 20);
    for x in (0..4).chain(8..10) {
        board.set(x, 19, Some(PieceKind::J));
    }
    let best = find_best_move(&board, &Piece::spawn(PieceKind::I, 10)).unwrap();
    // The half-turn shape ties and loses to the first rotation.
    assert_eq!(best.rotation, 0);
    assert_eq!((best.piece.x, best.piece.y), (4, 19));
    assert_eq!(best.piece.shape.width(), 4);
}

#[test]
fn custom_evaluator_steers_the_search() {
    let board = Board::new(10, 20);
    let best = find_best_move_with(&board, &Piece::spawn(PieceKind::I, 10), &LeftTower).unwrap();
    assert_eq!(best.rotation, 1);
    assert_eq!((best.piece.x, best.piece.y), (0, 16));
    assert_eq!(best.score, 4.0);
}

#[test]
fn placement_is_the_landed_piece() {
    let board = Board::new(10, 20);
    for kind in PieceKind::ALL {
        let best = find_best_move(&board, &Piece::spawn(kind, 10)).unwrap();
        assert_eq!(best.piece, best.piece.dropped(&board));
        assert!(best.piece.fits(&board));
        assert_eq!(best.piece.kind, kind);
    }
}

#[test]
fn apply_placement_checks_the_game() {
    let mut state = GameState::new(GameConfig {
        seed: Some(3),
        ..GameConfig::instant()
    });
    let piece = Piece::spawn(PieceKind::O, 10);
    let placement = find_best_move(state.board(), &piece).unwrap();
    assert_eq!(
        apply_placement(&mut state, &placement),
        Err(PlaceError::NotPlayable)
    );

    state.start();
    let active = state.active().unwrap();
    let other = PieceKind::ALL
        .into_iter()
        .find(|&k| k != active.kind)
        .unwrap();
    let wrong = find_best_move(state.board(), &Piece::spawn(other, 10)).unwrap();
    let err = apply_placement(&mut state, &wrong).unwrap_err();
    assert_eq!(err, PlaceError::KindMismatch);
    assert_eq!(err.code(), "invalid_place");

    let right = find_best_move(state.board(), &active).unwrap();
    assert_eq!(apply_placement(&mut state, &right), Ok(()));
    assert_eq!(state.pieces_spawned(), 2);
    assert_eq!(state.board().cells().iter().filter(|c| c.is_some()).count(), 4);
}

#[test]
fn bot_plays_a_full_game_without_stalling() {
    let mut state = GameState::new(GameConfig {
        seed: Some(11),
        ..GameConfig::instant()
    });
    state.start();
    let mut placed = 0;
    while placed < 200 {
        let Some(active) = state.active() else { break };
        let Some(best) = find_best_move(state.board(), &active) else { break };
        apply_placement(&mut state, &best).unwrap();
        placed += 1;
    }
    assert!(placed > 0);
    assert!(state.game_over() || placed == 200);
    assert!(state.score() == state.lines() * 10);
}

#[test]
fn attract_board_never_keeps_a_full_row() {
    let mut bot = AttractBot::new(10, 20, 42);
    for _ in 0..300 {
        bot.step();
        let board = bot.board();
        assert!((0..board.rows()).all(|y| !board.is_row_full(y)));
        let top = bot.current();
        assert_eq!(top.y, 0);
        assert!(top.x >= 0 && (top.x as usize) < board.cols() - top.shape.width());
    }
}

#[test]
fn attract_is_reproducible_from_its_seed() {
    let run = |seed| {
        let mut bot = AttractBot::new(12, 16, seed);
        let steps: Vec<AttractStep> = (0..80).map(|_| bot.step()).collect();
        (steps, bot.board().clone())
    };
    assert_eq!(run(9), run(9));
}

#[test]
fn attract_preview_matches_the_next_lock() {
    let mut bot = AttractBot::new(10, 20, 5);
    let planned = *bot.preview().unwrap();
    assert_eq!(bot.step(), AttractStep::Placed { cleared: 0 });
    for (x, y) in planned.piece.cells() {
        assert!(bot.board().is_occupied(x, y));
    }
}

#[test]
fn attract_resize_starts_over() {
    let mut bot = AttractBot::new(10, 20, 1).with_step_ms(10);
    assert!(bot.tick(10).is_some());
    bot.resize(10, 20);
    assert!(bot.board().cells().iter().any(|c| c.is_some()));

    bot.resize(30, 12);
    assert_eq!((bot.board().cols(), bot.board().rows()), (30, 12));
    assert!(bot.board().cells().iter().all(|c| c.is_none()));
    assert!(bot.preview().is_some());
}
