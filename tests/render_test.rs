//! Frame rendering through the app: menu, playfield, effects and the diff encoder

use blockfall::app::{key, App, Screen};
use blockfall::core::{Board, GameConfig, GameState};
use blockfall::settings::Settings;
use blockfall::term::{encode_diff_into, Effects, FrameBuffer, GameView, Viewport};
use blockfall::types::PieceKind;
use crossterm::event::KeyCode;

fn find(fb: &FrameBuffer, needle: &str) -> Option<(u16, u16)> {
    (0..fb.height()).find_map(|y| {
        let row = fb.row_text(y);
        row.find(needle)
            .map(|byte| (row[..byte].chars().count() as u16, y))
    })
}

fn seeded_app(seed: u32) -> App<blockfall::audio::NullSound> {
    let mut settings = Settings::default();
    settings.game.seed = Some(seed);
    settings.game.settle_pause_ms = 0;
    settings.game.clear_pause_ms = 0;
    App::headless(settings)
}

#[test]
fn menu_frame_shows_title_and_selection() {
    let mut app = seeded_app(3);
    let mut fb = FrameBuffer::new(0, 0);
    app.render_into(Viewport::new(80, 24), &mut fb);

    assert_eq!((fb.width(), fb.height()), (80, 24));
    assert!(find(&fb, "BLOCKFALL").is_some());
    let (_, play_y) = find(&fb, "Play").unwrap();
    assert!(fb.row_text(play_y).contains('▶'));
    let (_, quit_y) = find(&fb, "Quit").unwrap();
    assert!(!fb.row_text(quit_y).contains('▶'));

    app.handle_key_press(key(KeyCode::Down));
    app.render_into(Viewport::new(80, 24), &mut fb);
    let (_, quit_y) = find(&fb, "Quit").unwrap();
    assert!(fb.row_text(quit_y).contains('▶'));
}

#[test]
fn menu_board_follows_the_viewport() {
    let mut app = seeded_app(3);
    let mut fb = FrameBuffer::new(0, 0);
    app.render_into(Viewport::new(100, 30), &mut fb);
    let board = app.attract().board();
    assert_eq!((board.cols(), board.rows()), (50, 30));
}

#[test]
fn playing_frame_shows_the_panel() {
    let mut app = seeded_app(8);
    app.handle_key_press(key(KeyCode::Enter));
    assert_eq!(app.screen(), Screen::Playing);

    let mut fb = FrameBuffer::new(0, 0);
    app.render_into(Viewport::new(60, 24), &mut fb);
    for label in ["SCORE", "LINES", "LEVEL", "HOLD", "NEXT"] {
        assert!(find(&fb, label).is_some(), "{label}");
    }
    assert!(find(&fb, "BLOCKFALL").is_none());
}

#[test]
fn hard_drop_flash_fades_over_frames() {
    let mut app = seeded_app(8);
    app.handle_key_press(key(KeyCode::Enter));
    app.handle_key_press(key(KeyCode::Char(' ')));
    assert_eq!(app.effects().flashes().len(), 1);

    let mut fb = FrameBuffer::new(0, 0);
    for _ in 0..13 {
        app.render_into(Viewport::new(60, 24), &mut fb);
    }
    assert!(app.effects().is_empty());
}

#[test]
fn game_over_overlay_has_score_and_hints() {
    let mut board = Board::with_hidden_rows(10, 20, 4);
    for x in 0..10 {
        board.set(x, 0, Some(PieceKind::T));
        board.set(x, 1, Some(PieceKind::T));
    }
    let mut state = GameState::with_board(GameConfig::instant(), board);
    state.start();
    assert!(state.game_over());

    let fb = GameView::new().render(&state, &Effects::new(), Viewport::new(60, 24));
    assert!(find(&fb, "GAME OVER").is_some());
    assert!(find(&fb, "SCORE 0").is_some());
    assert!(find(&fb, "R restart").is_some());
    assert!(find(&fb, "Esc menu").is_some());
}

#[test]
fn tiny_viewports_clip_instead_of_panicking() {
    let mut app = seeded_app(2);
    let mut fb = FrameBuffer::new(0, 0);
    app.render_into(Viewport::new(10, 5), &mut fb);
    app.handle_key_press(key(KeyCode::Enter));
    app.render_into(Viewport::new(10, 5), &mut fb);
    assert_eq!((fb.width(), fb.height()), (10, 5));
}

#[test]
fn consecutive_frames_diff_to_the_change() {
    let mut app = seeded_app(4);
    app.handle_key_press(key(KeyCode::Enter));
    let viewport = Viewport::new(60, 24);

    let mut before = FrameBuffer::new(0, 0);
    app.render_into(viewport, &mut before);
    let mut same = FrameBuffer::new(0, 0);
    app.render_into(viewport, &mut same);
    let mut out = Vec::new();
    encode_diff_into(&before, &same, &mut out).unwrap();
    assert!(out.is_empty());

    app.handle_key_press(key(KeyCode::Char(' ')));
    let mut after = FrameBuffer::new(0, 0);
    app.render_into(viewport, &mut after);
    encode_diff_into(&before, &after, &mut out).unwrap();
    assert!(!out.is_empty());
}
